//! Test fixtures for integration tests.

use std::path::Path;
use std::sync::Arc;

use geores::alias::AliasTable;
use geores::candidates::CandidateGenerator;
use geores::entity::{EntityType, GeoEntity};
use geores::gazetteer::{GazetteerRecord, MockGazetteerIndex};
use geores::resolution::Resolver;

pub const EUROPE: u64 = 6255148;
pub const ITALY: u64 = 3175395;
pub const UNITED_KINGDOM: u64 = 2635167;
pub const LONDON: u64 = 2643743;
pub const CITY_OF_LONDON: u64 = 2643741;
pub const LONDON_ONTARIO: u64 = 6058560;
pub const FRANCE: u64 = 3017382;
pub const PARIS: u64 = 2988507;
pub const PARIS_DEPARTMENT: u64 = 2968815;
pub const PARIS_TEXAS: u64 = 4717560;
pub const INDIAN_SUBCONTINENT: u64 = 7729886;
pub const INDIA: u64 = 1269750;

pub const UK_CANONICAL: &str = "United Kingdom of Great Britain and Northern Ireland";

pub struct RecordBuilder {
    record: GazetteerRecord,
}

impl RecordBuilder {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            record: GazetteerRecord {
                id,
                name: name.to_string(),
                ascii_name: name.to_string(),
                alternate_names: vec![],
                latitude: 0.0,
                longitude: 0.0,
                feature_class: "P".to_string(),
                feature_code: "PPL".to_string(),
                country_code: None,
                secondary_country_codes: vec![],
                admin1_code: None,
                admin2_code: None,
                admin3_code: None,
                admin4_code: None,
                population: None,
                elevation: None,
                dem: None,
                timezone: None,
                modification_date: None,
            },
        }
    }

    pub fn alternates(mut self, names: &[&str]) -> Self {
        self.record.alternate_names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn feature(mut self, class: &str, code: &str) -> Self {
        self.record.feature_class = class.to_string();
        self.record.feature_code = code.to_string();
        self
    }

    pub fn country(mut self, code: &str) -> Self {
        self.record.country_code = Some(code.to_string());
        self
    }

    pub fn admin1(mut self, code: &str) -> Self {
        self.record.admin1_code = Some(code.to_string());
        self
    }

    pub fn population(mut self, population: u64) -> Self {
        self.record.population = Some(population);
        self
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.record.latitude = latitude;
        self.record.longitude = longitude;
        self
    }

    pub fn build(self) -> GazetteerRecord {
        self.record
    }
}

pub fn seeded_records() -> Vec<GazetteerRecord> {
    vec![
        RecordBuilder::new(EUROPE, "Europe")
            .alternates(&["Europa", "Evropa"])
            .feature("L", "CONT")
            .population(741_000_000)
            .coordinates(48.69096, 9.14062)
            .build(),
        RecordBuilder::new(ITALY, "Italy")
            .alternates(&["Italian Republic", "Italia", "Repubblica Italiana"])
            .feature("A", "PCLI")
            .country("IT")
            .admin1("00")
            .population(60_359_546)
            .coordinates(42.83333, 12.83333)
            .build(),
        RecordBuilder::new(UNITED_KINGDOM, UK_CANONICAL)
            .alternates(&["United Kingdom", "Great Britain"])
            .feature("A", "PCLI")
            .country("GB")
            .admin1("00")
            .population(66_488_991)
            .coordinates(54.75844, -2.69531)
            .build(),
        RecordBuilder::new(LONDON, "London")
            .alternates(&["Londres", "Londra"])
            .feature("P", "PPLC")
            .country("GB")
            .admin1("ENG")
            .population(8_961_989)
            .coordinates(51.50853, -0.12574)
            .build(),
        RecordBuilder::new(CITY_OF_LONDON, "City of London")
            .alternates(&["London"])
            .feature("A", "ADM2")
            .country("GB")
            .admin1("ENG")
            .population(8_071)
            .coordinates(51.51279, -0.09184)
            .build(),
        RecordBuilder::new(LONDON_ONTARIO, "London")
            .feature("P", "PPL")
            .country("CA")
            .admin1("08")
            .population(346_765)
            .coordinates(42.98339, -81.23304)
            .build(),
        RecordBuilder::new(FRANCE, "France")
            .alternates(&["French Republic", "République française"])
            .feature("A", "PCLI")
            .country("FR")
            .admin1("00")
            .population(66_987_244)
            .coordinates(46.0, 2.0)
            .build(),
        RecordBuilder::new(PARIS, "Paris")
            .alternates(&["Lutetia", "Paname"])
            .feature("P", "PPLC")
            .country("FR")
            .admin1("11")
            .population(2_138_551)
            .coordinates(48.85341, 2.3488)
            .build(),
        RecordBuilder::new(PARIS_DEPARTMENT, "Paris")
            .feature("A", "ADM2")
            .country("FR")
            .admin1("11")
            .population(2_148_271)
            .coordinates(48.8534, 2.3486)
            .build(),
        RecordBuilder::new(PARIS_TEXAS, "Paris")
            .feature("P", "PPLA2")
            .country("US")
            .admin1("TX")
            .population(24_171)
            .coordinates(33.66094, -95.55551)
            .build(),
        RecordBuilder::new(INDIAN_SUBCONTINENT, "Indian Subcontinent")
            .alternates(&["India"])
            .feature("T", "PEN")
            .admin1("00")
            .population(1_900_000_000)
            .build(),
        RecordBuilder::new(INDIA, "India")
            .alternates(&["Republic of India", "Bharat"])
            .feature("A", "PCLI")
            .country("IN")
            .admin1("00")
            .population(1_352_617_328)
            .coordinates(22.0, 79.0)
            .build(),
    ]
}

pub fn seeded_gazetteer() -> MockGazetteerIndex {
    MockGazetteerIndex::with_records(seeded_records())
}

/// The alias tables shipped in `data/`.
pub fn shipped_aliases() -> AliasTable {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    AliasTable::load(&data.join("custom-substitutions.csv"), &data.join("demonyms.csv"))
        .expect("shipped alias tables should load")
}

pub fn resolver_with(index: MockGazetteerIndex, aliases: AliasTable) -> Resolver<MockGazetteerIndex> {
    Resolver::new(CandidateGenerator::new(index), Arc::new(aliases))
}

pub fn seeded_resolver() -> Resolver<MockGazetteerIndex> {
    resolver_with(seeded_gazetteer(), shipped_aliases())
}

/// Entities laid out as if found left to right in one sentence.
pub fn entities(texts: &[&str]) -> Vec<GeoEntity> {
    let mut offset = 0;
    texts
        .iter()
        .map(|text| {
            let start = offset;
            offset += text.chars().count() + 1;
            GeoEntity::new(text, EntityType::CountryOrRegion, start, start + text.chars().count())
        })
        .collect()
}
