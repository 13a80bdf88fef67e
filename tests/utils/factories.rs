/// Test data factories using builder pattern
///
/// Provides convenient methods to create player records with sensible defaults
use chess_catalog::modules::players::domain::{entities::PlayerRecord, value_objects::Gender};

pub struct PlayerFactory {
    id: String,
    name: String,
    federation: String,
    gender: Gender,
    ratings: (u32, u32, u32),
    titles: Vec<&'static str>,
    women_titles: Vec<&'static str>,
    other_titles: Vec<&'static str>,
    designations: Vec<&'static str>,
    birth_year: Option<i32>,
    activity_flag: Option<&'static str>,
}

impl Default for PlayerFactory {
    fn default() -> Self {
        Self {
            id: "1000".to_string(),
            name: "Test, Player".to_string(),
            federation: "NOR".to_string(),
            gender: Gender::Male,
            ratings: (0, 0, 0),
            titles: Vec::new(),
            women_titles: Vec::new(),
            other_titles: Vec::new(),
            designations: Vec::new(),
            birth_year: None,
            activity_flag: None,
        }
    }
}

impl PlayerFactory {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: format!("Player, {}", id),
            id,
            ..Default::default()
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn federation(mut self, federation: &str) -> Self {
        self.federation = federation.to_string();
        self
    }

    pub fn female(mut self) -> Self {
        self.gender = Gender::Female;
        self
    }

    pub fn standard(mut self, rating: u32) -> Self {
        self.ratings.0 = rating;
        self
    }

    pub fn ratings(mut self, standard: u32, rapid: u32, blitz: u32) -> Self {
        self.ratings = (standard, rapid, blitz);
        self
    }

    pub fn titles(mut self, codes: &[&'static str]) -> Self {
        self.titles = codes.to_vec();
        self
    }

    pub fn women_titles(mut self, codes: &[&'static str]) -> Self {
        self.women_titles = codes.to_vec();
        self
    }

    pub fn other_titles(mut self, codes: &[&'static str]) -> Self {
        self.other_titles = codes.to_vec();
        self
    }

    pub fn designations(mut self, codes: &[&'static str]) -> Self {
        self.designations = codes.to_vec();
        self
    }

    pub fn born(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.activity_flag = Some("i");
        self
    }

    pub fn build(self) -> PlayerRecord {
        let (standard, rapid, blitz) = self.ratings;
        let mut record = PlayerRecord::new(self.id, self.name, self.federation, self.gender)
            .with_ratings(standard, rapid, blitz)
            .with_titles(&self.titles)
            .with_women_titles(&self.women_titles)
            .with_other_titles(&self.other_titles)
            .with_designations(&self.designations);
        if let Some(year) = self.birth_year {
            record = record.with_birth_year(year);
        }
        if let Some(flag) = self.activity_flag {
            record = record.with_activity_flag(flag);
        }
        record
    }

    /// `count` rated records with ids `start..start+count`; standard ratings descend
    /// from 2500 in steps of 10 and repeat every 150 records
    pub fn create_many(start: u32, count: u32, federation: &str) -> Vec<PlayerRecord> {
        (0..count)
            .map(|i| {
                PlayerFactory::new((start + i).to_string())
                    .federation(federation)
                    .standard(2500 - (i % 150) * 10)
                    .build()
            })
            .collect()
    }
}

/// Small mixed population shared by several suites
pub fn sample_population() -> Vec<PlayerRecord> {
    vec![
        PlayerFactory::new("1503014")
            .name("Carlsen, Magnus")
            .ratings(2830, 2820, 2880)
            .titles(&["GM"])
            .born(1990)
            .build(),
        PlayerFactory::new("35001000")
            .name("Sharma, Aarav")
            .federation("NEP")
            .ratings(2050, 1980, 0)
            .titles(&["FM"])
            .born(2010)
            .build(),
        PlayerFactory::new("35002000")
            .name("Thapa, Sita")
            .federation("NEP")
            .female()
            .ratings(1900, 0, 0)
            .women_titles(&["WFM"])
            .born(2008)
            .build(),
        PlayerFactory::new("35003000")
            .name("Gurung, Bikash")
            .federation("NEP")
            .ratings(1750, 0, 1700)
            .born(1975)
            .build(),
        PlayerFactory::new("35004000")
            .name("Rai, Kamal")
            .federation("NEP")
            .other_titles(&["IA", "FST"])
            .born(1960)
            .inactive()
            .build(),
        PlayerFactory::new("5000001")
            .name("Iyer, Meera")
            .federation("IND")
            .female()
            .ratings(0, 1600, 0)
            .designations(&["IO"])
            .build(),
        PlayerFactory::new("5000002")
            .name("Menon, Ravi")
            .federation("IND")
            .ratings(2450, 0, 0)
            .titles(&["IM"])
            .other_titles(&["FT"])
            .born(2005)
            .build(),
    ]
}
