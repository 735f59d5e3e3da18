//! Clinical input types for spontaneous pregnancy prognosis.
//!
//! Every field except `age` is optional. Categorical findings are closed
//! enumerations. Documents are read into a loosely typed record first so
//! that unknown categories and out-of-range counts surface as
//! `ValidationError`s rather than serde errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error raised when a clinical input is structurally invalid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Invalid {field} value: {value:?}")]
    InvalidCategory { field: &'static str, value: String },

    #[error("Endometriosis grade {0} out of range [0, 4]")]
    GradeOutOfRange(i64),

    #[error("{field} out of range, got {value}")]
    CountOutOfRange { field: &'static str, value: i64 },

    #[error("Unknown factor: {0:?}")]
    UnknownFactor(String),
}

/// Error raised while reading a clinical input document.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Malformed input JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Uterine myoma (fibroid) classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum MyomaType {
    #[default]
    None,
    Submucosal,
    IntramuralLarge,
    Subserosal,
}

impl MyomaType {
    /// No myoma reported.
    #[must_use]
    pub fn is_absent(self) -> bool {
        matches!(self, Self::None)
    }
}

impl FromStr for MyomaType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "submucosal" => Ok(Self::Submucosal),
            "intramural_large" => Ok(Self::IntramuralLarge),
            "subserosal" => Ok(Self::Subserosal),
            other => Err(ValidationError::InvalidCategory {
                field: "myomaType",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for MyomaType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Adenomyosis extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum AdenomyosisType {
    #[default]
    None,
    Focal,
    Diffuse,
}

impl AdenomyosisType {
    /// No adenomyosis reported.
    #[must_use]
    pub fn is_absent(self) -> bool {
        matches!(self, Self::None)
    }
}

impl FromStr for AdenomyosisType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "focal" => Ok(Self::Focal),
            "diffuse" => Ok(Self::Diffuse),
            other => Err(ValidationError::InvalidCategory {
                field: "adenomyosisType",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for AdenomyosisType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Endometrial polyp finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum PolypType {
    #[default]
    None,
    /// Single polyp under 1 cm
    Small,
    /// Large or multiple polyps
    Large,
    /// Polyp on the tubal ostium
    Ostium,
}

impl PolypType {
    /// No polyp reported.
    #[must_use]
    pub fn is_absent(self) -> bool {
        matches!(self, Self::None)
    }
}

impl FromStr for PolypType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "small" => Ok(Self::Small),
            "large" => Ok(Self::Large),
            "ostium" => Ok(Self::Ostium),
            other => Err(ValidationError::InvalidCategory {
                field: "polypType",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PolypType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Hysterosalpingography (tubal patency) result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum HsgResult {
    #[default]
    Unknown,
    Normal,
    /// One tube obstructed
    Unilateral,
    /// Both tubes obstructed
    Bilateral,
    /// Uterine malformation
    Malformation,
}

impl HsgResult {
    /// No HSG performed or result not reported.
    #[must_use]
    pub fn is_absent(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl FromStr for HsgResult {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "unknown" => Ok(Self::Unknown),
            "normal" => Ok(Self::Normal),
            "unilateral" => Ok(Self::Unilateral),
            "bilateral" => Ok(Self::Bilateral),
            "malformation" => Ok(Self::Malformation),
            other => Err(ValidationError::InvalidCategory {
                field: "hsgResult",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for HsgResult {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for HsgResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Normal => "normal",
            Self::Unilateral => "unilateral",
            Self::Bilateral => "bilateral",
            Self::Malformation => "malformation",
        };
        f.write_str(s)
    }
}

/// One evaluation request.
///
/// Built by the caller (form, CLI, another service) and treated as immutable
/// by the engine. Units follow common fertility-clinic reporting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawClinicalInput")]
pub struct ClinicalInput {
    /// Age in years
    pub age: f64,

    /// Body-mass index (kg/m²)
    pub bmi: Option<f64>,

    /// Average menstrual cycle length in days
    pub cycle_length: Option<f64>,

    pub has_pcos: bool,

    /// ASRM stage, 0 (none) to 4
    pub endometriosis_grade: Option<u8>,

    pub myoma_type: MyomaType,
    pub adenomyosis_type: AdenomyosisType,
    pub polyp_type: PolypType,
    pub hsg_result: HsgResult,

    /// Prior tubal ligation (OTB)
    pub has_otb: bool,

    /// Anti-Müllerian hormone, ng/mL
    pub amh: Option<f64>,

    /// Prolactin, ng/mL
    pub prolactin: Option<f64>,

    /// Thyroid-stimulating hormone, mIU/L
    pub tsh: Option<f64>,

    /// HOMA-IR index; derived from fasting glucose and insulin when absent
    pub homa: Option<f64>,

    /// Fasting glucose, mg/dL
    pub fasting_glucose: Option<f64>,

    /// Fasting insulin, µU/mL
    pub fasting_insulin: Option<f64>,

    /// Years trying to conceive
    pub infertility_years: Option<f64>,

    /// Number of previous pelvic surgeries
    pub pelvic_surgeries: Option<u32>,

    /// Sperm concentration, million/mL
    pub sperm_concentration: Option<f64>,

    /// Progressive motility, %
    pub sperm_motility: Option<f64>,

    /// Normal forms (strict criteria), %
    pub sperm_morphology: Option<f64>,
}

impl ClinicalInput {
    /// Create an input with only the age set.
    #[must_use]
    pub fn new(age: f64) -> Self {
        Self {
            age,
            ..Default::default()
        }
    }

    /// Parse and validate an input from a JSON document.
    ///
    /// # Errors
    /// Returns `InputError::Json` for malformed JSON and `InputError::Invalid`
    /// for unknown categories, out-of-range counts or invalid numbers.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let raw: RawClinicalInput = serde_json::from_str(json)?;
        Ok(Self::try_from(raw)?)
    }

    /// HOMA-IR, either as reported or derived from fasting glucose and insulin.
    #[must_use]
    pub fn homa_ir(&self) -> Option<f64> {
        self.homa.or_else(|| match (self.fasting_glucose, self.fasting_insulin) {
            (Some(glucose), Some(insulin)) => Some(glucose * insulin / 405.0),
            _ => None,
        })
    }

    /// Check that every numeric value is finite and non-negative and that
    /// the endometriosis grade is within 0–4.
    ///
    /// # Errors
    /// Returns the first violation found, in field order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_number("age", Some(self.age))?;
        check_number("bmi", self.bmi)?;
        check_number("cycleLength", self.cycle_length)?;
        check_number("amh", self.amh)?;
        check_number("prolactin", self.prolactin)?;
        check_number("tsh", self.tsh)?;
        check_number("homa", self.homa)?;
        check_number("fastingGlucose", self.fasting_glucose)?;
        check_number("fastingInsulin", self.fasting_insulin)?;
        check_number("infertilityYears", self.infertility_years)?;
        check_number("spermConcentration", self.sperm_concentration)?;
        check_number("spermMotility", self.sperm_motility)?;
        check_number("spermMorphology", self.sperm_morphology)?;

        if let Some(grade) = self.endometriosis_grade {
            if grade > 4 {
                return Err(ValidationError::GradeOutOfRange(i64::from(grade)));
            }
        }

        Ok(())
    }
}

/// Wire form of `ClinicalInput`: categories as strings, counts as signed
/// integers, so that conversion can report typed errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClinicalInput {
    age: f64,
    bmi: Option<f64>,
    cycle_length: Option<f64>,
    #[serde(default)]
    has_pcos: bool,
    endometriosis_grade: Option<i64>,
    myoma_type: Option<String>,
    adenomyosis_type: Option<String>,
    polyp_type: Option<String>,
    hsg_result: Option<String>,
    #[serde(default)]
    has_otb: bool,
    amh: Option<f64>,
    prolactin: Option<f64>,
    tsh: Option<f64>,
    homa: Option<f64>,
    fasting_glucose: Option<f64>,
    fasting_insulin: Option<f64>,
    infertility_years: Option<f64>,
    pelvic_surgeries: Option<i64>,
    sperm_concentration: Option<f64>,
    sperm_motility: Option<f64>,
    sperm_morphology: Option<f64>,
}

impl TryFrom<RawClinicalInput> for ClinicalInput {
    type Error = ValidationError;

    fn try_from(raw: RawClinicalInput) -> Result<Self, Self::Error> {
        let input = Self {
            age: raw.age,
            bmi: raw.bmi,
            cycle_length: raw.cycle_length,
            has_pcos: raw.has_pcos,
            endometriosis_grade: raw.endometriosis_grade.map(grade).transpose()?,
            myoma_type: category(raw.myoma_type)?,
            adenomyosis_type: category(raw.adenomyosis_type)?,
            polyp_type: category(raw.polyp_type)?,
            hsg_result: category(raw.hsg_result)?,
            has_otb: raw.has_otb,
            amh: raw.amh,
            prolactin: raw.prolactin,
            tsh: raw.tsh,
            homa: raw.homa,
            fasting_glucose: raw.fasting_glucose,
            fasting_insulin: raw.fasting_insulin,
            infertility_years: raw.infertility_years,
            pelvic_surgeries: raw
                .pelvic_surgeries
                .map(|n| count("pelvicSurgeries", n))
                .transpose()?,
            sperm_concentration: raw.sperm_concentration,
            sperm_motility: raw.sperm_motility,
            sperm_morphology: raw.sperm_morphology,
        };

        input.validate()?;
        Ok(input)
    }
}

/// Absent and empty strings both map to the enumeration's absent value.
fn category<T>(value: Option<String>) -> Result<T, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    value.as_deref().unwrap_or("").parse()
}

fn grade(value: i64) -> Result<u8, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: "endometriosisGrade",
            value: value as f64,
        });
    }
    u8::try_from(value)
        .ok()
        .filter(|g| *g <= 4)
        .ok_or(ValidationError::GradeOutOfRange(value))
}

fn count(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field,
            value: value as f64,
        });
    }
    u32::try_from(value).map_err(|_| ValidationError::CountOutOfRange { field, value })
}

fn check_number(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::NonFinite { field, value: v }),
        Some(v) if v < 0.0 => Err(ValidationError::Negative { field, value: v }),
        _ => Ok(()),
    }
}
