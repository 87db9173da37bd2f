//! Family context of a proband: PED-file loading and trio membership.

use std::io::BufRead;

use indexmap::IndexMap;

use crate::err::PedError;

/// Sex of an individual.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl std::str::FromStr for Sex {
    type Err = PedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "1" | "m" | "M" | "male" => Sex::Male,
            "2" | "f" | "F" | "female" => Sex::Female,
            "0" | "unknown" => Sex::Unknown,
            _ => return Err(PedError::UnknownSex(s.to_string())),
        })
    }
}

/// Parse the affected status column, "1" is unaffected and "2" is affected.
pub fn parse_affected(s: &str) -> Result<bool, PedError> {
    match s {
        "1" => Ok(false),
        "2" => Ok(true),
        _ => Err(PedError::UnknownAffected(s.to_string())),
    }
}

/// One sequenced individual.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Person {
    /// Individual identifier.
    pub id: String,
    /// Sex of the individual.
    pub sex: Sex,
    /// Whether the individual is affected.
    pub affected: bool,
    /// Optional path to the individual's VCF file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Person {
    pub fn new(id: &str, sex: Sex, affected: bool) -> Self {
        Self {
            id: id.to_string(),
            sex,
            affected,
            path: None,
        }
    }

    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }
}

/// Combined affected status of both parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ParentsAffected {
    ParentsUnaffected,
    MotherAffected,
    FatherAffected,
    BothParentsAffected,
}

/// A proband with optional parents.
///
/// This is read-only context for one filter run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Family {
    /// Family identifier.
    pub id: String,
    /// The proband.
    pub child: Person,
    /// The mother, if sequenced.
    #[serde(default)]
    pub mother: Option<Person>,
    /// The father, if sequenced.
    #[serde(default)]
    pub father: Option<Person>,
}

impl Family {
    /// Construct a proband-only family.
    pub fn new(id: &str, child: Person) -> Self {
        Self {
            id: id.to_string(),
            child,
            mother: None,
            father: None,
        }
    }

    /// Attach the mother, checking that she is recorded as female.
    pub fn with_mother(mut self, mother: Person) -> Result<Self, PedError> {
        check_parent_sex(&mother, Sex::Female, "mother")?;
        self.mother = Some(mother);
        Ok(self)
    }

    /// Attach the father, checking that he is recorded as male.
    pub fn with_father(mut self, father: Person) -> Result<Self, PedError> {
        check_parent_sex(&father, Sex::Male, "father")?;
        self.father = Some(father);
        Ok(self)
    }

    /// Whether both parents were sequenced.
    pub fn has_parents(&self) -> bool {
        self.mother.is_some() && self.father.is_some()
    }

    /// Affected status of the parents, `None` unless both parents are present.
    pub fn parents_affected_status(&self) -> Option<ParentsAffected> {
        let (mother, father) = (self.mother.as_ref()?, self.father.as_ref()?);
        Some(match (mother.affected, father.affected) {
            (false, false) => ParentsAffected::ParentsUnaffected,
            (true, false) => ParentsAffected::MotherAffected,
            (false, true) => ParentsAffected::FatherAffected,
            (true, true) => ParentsAffected::BothParentsAffected,
        })
    }
}

fn check_parent_sex(parent: &Person, expected: Sex, role: &'static str) -> Result<(), PedError> {
    if parent.sex == expected {
        Ok(())
    } else {
        tracing::warn!(
            "{}'s sex differs from that expected as {}",
            &parent.id,
            role
        );
        Err(PedError::ParentSexMismatch {
            id: parent.id.clone(),
            sex: parent.sex.to_string(),
            role,
        })
    }
}

/// One line of a PED file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PedLine {
    family: String,
    person: Person,
    father: String,
    mother: String,
}

impl std::str::FromStr for PedLine {
    type Err = PedError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let cols = line.split_whitespace().collect::<Vec<_>>();
        if cols.len() < 6 {
            return Err(PedError::TooFewColumns(cols.len(), line.to_string()));
        }
        Ok(PedLine {
            family: cols[0].to_string(),
            person: Person {
                id: cols[1].to_string(),
                sex: cols[4].parse()?,
                affected: parse_affected(cols[5])?,
                path: cols.get(6).map(|p| p.to_string()),
            },
            father: cols[2].to_string(),
            mother: cols[3].to_string(),
        })
    }
}

/// Read families from a LINKAGE PED file.
///
/// Columns are family, individual, father, mother, sex, affected status, and
/// an optional path to the VCF file.  Every individual with both parent
/// columns set is a proband; parents that are not listed themselves are left
/// out of the family.
pub fn read_families<R: BufRead>(reader: R) -> Result<Vec<Family>, anyhow::Error> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        lines.push(trimmed.parse::<PedLine>()?);
    }

    let by_id = lines
        .iter()
        .map(|l| (l.person.id.clone(), l))
        .collect::<IndexMap<_, _>>();

    let mut result = Vec::new();
    for line in lines.iter().filter(|l| l.father != "0" && l.mother != "0") {
        let mut family = Family::new(&line.family, line.person.clone());
        if let Some(father) = by_id.get(&line.father) {
            family = family.with_father(father.person.clone())?;
        }
        if let Some(mother) = by_id.get(&line.mother) {
            family = family.with_mother(mother.person.clone())?;
        }
        result.push(family);
    }

    tracing::debug!("read {} families from PED", result.len());
    Ok(result)
}

/// Load families from the PED file at `path`.
pub fn load_families(path: &str) -> Result<Vec<Family>, anyhow::Error> {
    let file = std::fs::File::open(path)
        .map_err(|e| anyhow::anyhow!("could not open PED file {}: {}", path, e))?;
    read_families(std::io::BufReader::new(file))
}

/// Select the family of the given proband, or the only one if `proband` is `None`.
pub fn select_family(families: Vec<Family>, proband: Option<&str>) -> Result<Family, PedError> {
    match proband {
        Some(proband) => families
            .into_iter()
            .find(|f| f.child.id == proband)
            .ok_or_else(|| PedError::UnknownProband(proband.to_string())),
        None => {
            if families.len() > 1 {
                return Err(PedError::AmbiguousProband(families.len()));
            }
            families.into_iter().next().ok_or(PedError::NoProband)
        }
    }
}
