use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical age-group codes used by age-scoped rankings and statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    U8,
    U10,
    U12,
    U14,
    U16,
    U18,
    S20,
    S40,
    S50,
    S60,
    S70,
}

/// Inclusive birth-year window of an age group for one reference year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupDescriptor {
    pub code: AgeGroup,
    /// `None` when the group is open-ended towards older players
    pub min_birth_year: Option<i32>,
    pub max_birth_year: i32,
}

impl AgeGroupDescriptor {
    pub fn contains(&self, birth_year: i32) -> bool {
        birth_year <= self.max_birth_year && self.min_birth_year.map_or(true, |min| birth_year >= min)
    }
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 11] = [
        AgeGroup::U8,
        AgeGroup::U10,
        AgeGroup::U12,
        AgeGroup::U14,
        AgeGroup::U16,
        AgeGroup::U18,
        AgeGroup::S20,
        AgeGroup::S40,
        AgeGroup::S50,
        AgeGroup::S60,
        AgeGroup::S70,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AgeGroup::U8 => "U8",
            AgeGroup::U10 => "U10",
            AgeGroup::U12 => "U12",
            AgeGroup::U14 => "U14",
            AgeGroup::U16 => "U16",
            AgeGroup::U18 => "U18",
            AgeGroup::S20 => "S20",
            AgeGroup::S40 => "S40",
            AgeGroup::S50 => "S50",
            AgeGroup::S60 => "S60",
            AgeGroup::S70 => "S70",
        }
    }

    /// Inclusive age span; youth groups start at 0 and overlap each other.
    /// Senior groups are ten-year windows and S70 has no upper age.
    pub fn age_span(&self) -> (i32, Option<i32>) {
        match self {
            AgeGroup::U8 => (0, Some(8)),
            AgeGroup::U10 => (0, Some(10)),
            AgeGroup::U12 => (0, Some(12)),
            AgeGroup::U14 => (0, Some(14)),
            AgeGroup::U16 => (0, Some(16)),
            AgeGroup::U18 => (0, Some(18)),
            AgeGroup::S20 => (20, Some(29)),
            AgeGroup::S40 => (40, Some(49)),
            AgeGroup::S50 => (50, Some(59)),
            AgeGroup::S60 => (60, Some(69)),
            AgeGroup::S70 => (70, None),
        }
    }

    pub fn descriptor(&self, current_year: i32) -> AgeGroupDescriptor {
        let (min_age, max_age) = self.age_span();
        AgeGroupDescriptor {
            code: *self,
            min_birth_year: max_age.map(|age| current_year - age),
            max_birth_year: current_year - min_age,
        }
    }

    pub fn valid_codes() -> Vec<&'static str> {
        Self::ALL.iter().map(AgeGroup::code).collect()
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for AgeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        AgeGroup::ALL
            .iter()
            .find(|group| group.code() == code)
            .copied()
            .ok_or_else(|| format!("Invalid age group: {}", s))
    }
}

/// Single-year-boundary age buckets used by the overall statistics report
pub const AGE_BUCKET_BOUNDARIES: [i32; 15] = [0, 8, 10, 12, 14, 16, 18, 20, 21, 30, 40, 50, 60, 70, 80];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgeBucket {
    /// Lowest age in the bucket
    pub min_age: i32,
    /// Highest age in the bucket, `None` for the open top bucket
    pub max_age: Option<i32>,
}

impl AgeBucket {
    pub fn all() -> Vec<AgeBucket> {
        let mut buckets: Vec<AgeBucket> = AGE_BUCKET_BOUNDARIES
            .windows(2)
            .map(|pair| AgeBucket {
                min_age: pair[0],
                max_age: Some(pair[1] - 1),
            })
            .collect();
        buckets.push(AgeBucket {
            min_age: AGE_BUCKET_BOUNDARIES[AGE_BUCKET_BOUNDARIES.len() - 1],
            max_age: None,
        });
        buckets
    }

    pub fn for_age(age: i32) -> Option<AgeBucket> {
        if age < 0 {
            return None;
        }
        Self::all()
            .into_iter()
            .find(|bucket| age >= bucket.min_age && bucket.max_age.map_or(true, |max| age <= max))
    }

    pub fn label(&self) -> String {
        match self.max_age {
            None => format!("{}+", self.min_age),
            Some(max) if max == self.min_age => format!("{}", self.min_age),
            Some(max) => format!("{}-{}", self.min_age, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("U18".parse::<AgeGroup>(), Ok(AgeGroup::U18));
        assert_eq!("s70".parse::<AgeGroup>(), Ok(AgeGroup::S70));
        assert!("U19".parse::<AgeGroup>().is_err());
        assert_eq!(AgeGroup::valid_codes().len(), 11);
    }

    #[test]
    fn test_u18_descriptor() {
        let descriptor = AgeGroup::U18.descriptor(2025);
        assert_eq!(descriptor.min_birth_year, Some(2007));
        assert_eq!(descriptor.max_birth_year, 2025);
        assert!(descriptor.contains(2010));
        assert!(!descriptor.contains(2006));
    }

    #[test]
    fn test_senior_descriptors() {
        let s50 = AgeGroup::S50.descriptor(2025);
        assert_eq!(s50.min_birth_year, Some(1966));
        assert_eq!(s50.max_birth_year, 1975);

        let s20 = AgeGroup::S20.descriptor(2025);
        assert_eq!(s20.min_birth_year, Some(1996));
        assert_eq!(s20.max_birth_year, 2005);
        assert!(s20.contains(2005));
        assert!(s20.contains(1996));
        assert!(!s20.contains(1995));
        assert!(!s20.contains(2006));

        let s70 = AgeGroup::S70.descriptor(2025);
        assert_eq!(s70.min_birth_year, None);
        assert_eq!(s70.max_birth_year, 1955);
        assert!(s70.contains(1930));
    }

    #[test]
    fn test_buckets_cover_all_ages_once() {
        let buckets = AgeBucket::all();
        assert_eq!(buckets.len(), 15);
        for age in 0..120 {
            let matching = buckets
                .iter()
                .filter(|b| age >= b.min_age && b.max_age.map_or(true, |max| age <= max))
                .count();
            assert_eq!(matching, 1, "age {}", age);
        }
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(AgeBucket::for_age(5).unwrap().label(), "0-7");
        assert_eq!(AgeBucket::for_age(20).unwrap().label(), "20");
        assert_eq!(AgeBucket::for_age(25).unwrap().label(), "21-29");
        assert_eq!(AgeBucket::for_age(95).unwrap().label(), "80+");
        assert_eq!(AgeBucket::for_age(-1), None);
    }
}
