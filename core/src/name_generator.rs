//! Deterministic company identity generation using curated lists.
//!
//! Produces Brazilian-flavoured company names, contact e-mails,
//! state-consistent phone numbers and "City - UF" addresses.
//! All generation is deterministic (same RNG seed = same identities).

use crate::rng::StreamRng;

/// A drawn company identity, before any backup attributes are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyIdentity {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Deterministic name generator using curated name lists
pub struct NameGenerator;

impl NameGenerator {
    /// Draw a complete identity. Location is drawn first so the phone
    /// area code always matches the address state.
    pub fn generate_identity(rng: &mut StreamRng) -> CompanyIdentity {
        let (state, cities) = *rng.pick(STATES);
        let city = *rng.pick(cities);
        let base = *rng.pick(Self::company_names());
        let suffix = *rng.pick(Self::company_suffixes());

        CompanyIdentity {
            name: format!("{base} {suffix}"),
            email: Self::email_for(base),
            phone: Self::generate_phone(state, rng),
            address: format!("{city} - {state}"),
        }
    }

    /// `contato@<base lowercased, spaces removed>.com.br`
    pub fn email_for(base: &str) -> String {
        let domain: String = base
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        format!("contato@{domain}.com.br")
    }

    /// `(AA) NNNN-NNNN` with an area code belonging to `state`.
    pub fn generate_phone(state: &str, rng: &mut StreamRng) -> String {
        let codes = Self::area_codes(state);
        let area = *rng.pick(codes);
        let head = rng.in_range(1000..=9999);
        let tail = rng.in_range(1000..=9999);
        format!("({area}) {head}-{tail}")
    }

    fn area_codes(state: &str) -> &'static [&'static str] {
        AREA_CODES
            .iter()
            .find(|(uf, _)| *uf == state)
            .map(|(_, codes)| *codes)
            .unwrap_or(FALLBACK_AREA_CODES)
    }

    /// Company base names
    fn company_names() -> &'static [&'static str] {
        &[
            "Soluções Empresariais", "Tech Solutions", "Inovação Digital", "Sistemas Integrados",
            "DataGuard Brasil", "Cloud Masters", "Alpha Data Center", "Beta Solutions",
            "Digital Systems", "TechCorp Brasil", "Inovação Tech", "DataFlow Solutions",
            "CloudTech Brasil", "SecureData", "InfoSystems", "TechBridge Corp",
            "DataVault Brasil", "CloudFirst", "TechNova Solutions", "DataCore Systems",
            "Inovação Data", "TechFlow Corp", "CloudSecure", "DataTech Brasil",
            "TechInnovate", "CloudBridge Solutions", "DataStream Corp", "TechVault",
            "CloudData Systems", "DataInnovate", "TechMax", "DataPro", "CloudPro",
            "TechCore", "CloudMax", "TechData", "DataCloud", "CloudFlow", "TechStream",
            "DataBridge", "CloudVault", "TechSecure", "DataFirst", "CloudNova",
            "TechDigital", "DataSystems", "CloudSystems", "TechLabs", "DataLabs",
            "CloudLabs", "TechWorks", "DataWorks", "TechGroup", "DataGroup",
            "TechPartners", "DataAlliance", "CloudNetwork", "TechConnect", "DataConnect",
            "TechLink", "DataHub", "CloudHub", "TechCenter", "DataCenter", "CloudBase",
            "TechZone", "DataSpace", "CloudPoint", "TechNode", "DataGrid", "CloudWeb",
            "TechNet", "DataMesh", "CloudFabric", "TechMatrix", "DataVector",
            "CloudQuantum", "TechNeural", "DataAI", "CloudML",
        ]
    }

    /// Legal-form and branding suffixes
    fn company_suffixes() -> &'static [&'static str] {
        &[
            "Ltda", "LTDA", "S.A.", "ME", "EIRELI", "Corp", "Brasil", "Digital",
            "Tech", "Data", "Cloud", "Systems", "Solutions", "Group", "Labs",
            "Works", "Partners", "Network", "Hub", "Center",
        ]
    }
}

/// Federative units with a sample of their larger cities.
const STATES: &[(&str, &[&str])] = &[
    ("SP", &["São Paulo", "Campinas", "Santos", "Ribeirão Preto", "Sorocaba", "Guarulhos"]),
    ("RJ", &["Rio de Janeiro", "Niterói", "Nova Iguaçu", "Duque de Caxias", "Petrópolis"]),
    ("MG", &["Belo Horizonte", "Uberlândia", "Contagem", "Juiz de Fora", "Betim"]),
    ("RS", &["Porto Alegre", "Caxias do Sul", "Pelotas", "Canoas", "Santa Maria"]),
    ("PR", &["Curitiba", "Londrina", "Maringá", "Ponta Grossa", "Cascavel"]),
    ("SC", &["Florianópolis", "Joinville", "Blumenau", "São José", "Chapecó"]),
    ("BA", &["Salvador", "Feira de Santana", "Vitória da Conquista", "Camaçari"]),
    ("GO", &["Goiânia", "Aparecida de Goiânia", "Anápolis", "Rio Verde"]),
    ("PE", &["Recife", "Jaboatão dos Guararapes", "Olinda", "Caruaru", "Petrolina"]),
    ("CE", &["Fortaleza", "Caucaia", "Juazeiro do Norte", "Sobral"]),
    ("PA", &["Belém", "Ananindeua", "Santarém", "Marabá"]),
    ("MT", &["Cuiabá", "Várzea Grande", "Rondonópolis", "Sinop"]),
    ("MS", &["Campo Grande", "Dourados", "Três Lagoas", "Corumbá"]),
    ("AL", &["Maceió", "Arapiraca", "Rio Largo"]),
    ("RN", &["Natal", "Mossoró", "Parnamirim"]),
    ("PB", &["João Pessoa", "Campina Grande", "Santa Rita"]),
    ("AM", &["Manaus", "Parintins", "Itacoatiara"]),
    ("RO", &["Porto Velho", "Ji-Paraná", "Ariquemes"]),
    ("AC", &["Rio Branco", "Cruzeiro do Sul"]),
    ("RR", &["Boa Vista", "Rorainópolis"]),
    ("AP", &["Macapá", "Santana"]),
    ("TO", &["Palmas", "Araguaína", "Gurupi"]),
    ("PI", &["Teresina", "Parnaíba", "Picos"]),
    ("MA", &["São Luís", "Imperatriz", "Timon"]),
    ("SE", &["Aracaju", "Lagarto", "Itabaiana"]),
    ("DF", &["Brasília", "Gama", "Taguatinga", "Ceilândia"]),
];

const FALLBACK_AREA_CODES: &[&str] = &["11"];

const AREA_CODES: &[(&str, &[&str])] = &[
    ("SP", &["11", "12", "13", "14", "15", "16", "17", "18", "19"]),
    ("RJ", &["21", "22", "24"]),
    ("MG", &["31", "32", "33", "34", "35", "37", "38"]),
    ("RS", &["51", "53", "54", "55"]),
    ("PR", &["41", "42", "43", "44", "45", "46"]),
    ("SC", &["47", "48", "49"]),
    ("BA", &["71", "73", "74", "75", "77"]),
    ("GO", &["62", "64"]),
    ("PE", &["81", "87"]),
    ("CE", &["85", "88"]),
    ("PA", &["91", "93", "94"]),
    ("MT", &["65", "66"]),
    ("MS", &["67"]),
    ("AL", &["82"]),
    ("RN", &["84"]),
    ("PB", &["83"]),
    ("AM", &["92", "97"]),
    ("RO", &["69"]),
    ("AC", &["68"]),
    ("RR", &["95"]),
    ("AP", &["96"]),
    ("TO", &["63"]),
    ("PI", &["86", "89"]),
    ("MA", &["98", "99"]),
    ("SE", &["79"]),
    ("DF", &["61"]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn identity_generation_is_deterministic() {
        let mut rng1 = RngBank::new(12345).for_stream(StreamSlot::Population);
        let mut rng2 = RngBank::new(12345).for_stream(StreamSlot::Population);

        let a = NameGenerator::generate_identity(&mut rng1);
        let b = NameGenerator::generate_identity(&mut rng2);

        assert_eq!(a, b, "Same seed should produce same identity");
    }

    #[test]
    fn phone_area_code_matches_state() {
        let mut rng = RngBank::new(77).for_stream(StreamSlot::Population);

        for _ in 0..200 {
            let id = NameGenerator::generate_identity(&mut rng);
            let state = id.address.rsplit(" - ").next().unwrap();
            let area = &id.phone[1..3];
            let codes = NameGenerator::area_codes(state);
            assert!(codes.contains(&area), "{area} not an area code of {state}");

            // (AA) NNNN-NNNN
            assert_eq!(id.phone.len(), 14, "bad phone: {}", id.phone);
        }
    }

    #[test]
    fn email_strips_spaces_and_lowercases() {
        assert_eq!(
            NameGenerator::email_for("Tech Solutions"),
            "contato@techsolutions.com.br"
        );
        assert_eq!(NameGenerator::email_for("DataAI"), "contato@dataai.com.br");
    }
}
