use std::fmt;

use serde::{
    ser::{SerializeMap, Serializer},
    Serialize,
};

/// One node of a prerequisite or corequisite expression tree.
///
/// A requirement is an arbitrarily nested boolean expression: groups combine
/// their children with a single connective, and the remaining variants are the
/// leaves (a course, a placement result, a permission, a class standing, or a
/// skill). Consumers must dispatch exhaustively; adding a variant is a breaking
/// change.
///
/// A tree is owned exclusively by the [`CourseInfo`](crate::CourseInfo) that
/// contains it. Courses reference each other by name only, never by embedding
/// another course's tree, so the structure is acyclic by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum RequirementNode {
    /// An AND/OR combination of child requirements.
    ///
    /// Valid catalog data never produces an empty `children` list, but
    /// consumers must tolerate one by treating the group as rendering to
    /// nothing rather than failing.
    Group {
        /// The connective joining the children.
        kind: GroupKind,
        /// Ordered child requirements.
        children: Vec<RequirementNode>,
    },

    /// A reference to another catalog course, by name.
    ///
    /// The name is not validated against the catalog here; an unknown
    /// reference still renders as text, it just produces no graph edge.
    Course {
        /// Catalog key, e.g. `"MATH 112"`.
        course: String,
        /// Minimum grade when the source text states one, e.g. `"C"`.
        min_grade: Option<String>,
    },

    /// A placement-test or placement-level requirement.
    Placement {
        /// The raw phrase. Always present and the only field guaranteed
        /// renderable.
        name: String,
        /// Coarse classification of the placement requirement.
        kind: Option<PlacementKind>,
        /// Subject area, e.g. `"MATH"`.
        subject: Option<String>,
        /// Exam name, e.g. `"ALEKS"` or `"SAT"`.
        exam: Option<String>,
        /// Placement into (or above) this course satisfies the requirement.
        min_course: Option<String>,
        /// Placement level described in prose, e.g. `"college algebra"`.
        level: Option<String>,
        /// Minimum score. Kept as number-or-text because sources vary
        /// (`250` vs `"QAS 250"`).
        min_score: Option<Score>,
    },

    /// A permission or approval requirement.
    Permission {
        /// The raw phrase. Always present.
        raw: String,
        /// Coarse category of the permission.
        kind: Option<PermissionKind>,
        /// Who grants the permission.
        authority: Option<PermissionAuthority>,
        /// What must happen for it to be granted.
        action: Option<PermissionAction>,
        /// Artifacts involved (proposal, form, application).
        artifacts: Vec<String>,
    },

    /// A class-standing requirement.
    Standing {
        /// The exact phrase from the source.
        standing: String,
        /// Normalized standing, when the phrase maps onto one.
        normalized: Option<Standing>,
    },

    /// A skill requirement, kept as the exact phrase from the source.
    Skill {
        /// The skill phrase.
        name: String,
    },
}

/// The connective of a [`RequirementNode::Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupKind {
    /// All children must be satisfied.
    And,
    /// At least one child must be satisfied.
    Or,
}

impl GroupKind {
    /// The wire/display name of the connective.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Parses the wire name of a connective.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            _ => None,
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placement score that may be numeric or textual.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Score {
    /// A plain numeric score.
    Number(f64),
    /// A textual score, e.g. `"QAS 250"`.
    Text(String),
}

/// Coarse classification of a placement requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementKind {
    /// Placement into a specific course.
    PlacementIntoCourse,
    /// Placement above a specific course.
    PlacementAboveCourse,
    /// A placement test must be taken.
    PlacementTestRequired,
    /// A score threshold must be met.
    ScoreThreshold,
    /// A diagnostic exam.
    Diagnostic,
    /// Unclassified.
    Unknown,
}

impl PlacementKind {
    /// Parses a wire value, degrading unrecognized values to [`Self::Unknown`].
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "PLACEMENT_INTO_COURSE" => Self::PlacementIntoCourse,
            "PLACEMENT_ABOVE_COURSE" => Self::PlacementAboveCourse,
            "PLACEMENT_TEST_REQUIRED" => Self::PlacementTestRequired,
            "SCORE_THRESHOLD" => Self::ScoreThreshold,
            "DIAGNOSTIC" => Self::Diagnostic,
            _ => Self::Unknown,
        }
    }
}

/// Coarse category of a permission requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionKind {
    /// Approval from the instructor.
    InstructorApproval,
    /// Approval from an advisor.
    AdvisorApproval,
    /// Approval from the department.
    DepartmentApproval,
    /// Approval from the school.
    SchoolApproval,
    /// Approval from the program.
    ProgramApproval,
    /// An administrative override.
    AdminOverride,
    /// Unclassified.
    Unknown,
}

impl PermissionKind {
    /// Parses a wire value, degrading unrecognized values to [`Self::Unknown`].
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "INSTRUCTOR_APPROVAL" => Self::InstructorApproval,
            "ADVISOR_APPROVAL" => Self::AdvisorApproval,
            "DEPARTMENT_APPROVAL" => Self::DepartmentApproval,
            "SCHOOL_APPROVAL" => Self::SchoolApproval,
            "PROGRAM_APPROVAL" => Self::ProgramApproval,
            "ADMIN_OVERRIDE" => Self::AdminOverride,
            _ => Self::Unknown,
        }
    }
}

/// Who grants a permission requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionAuthority {
    /// The course instructor.
    Instructor,
    /// A supervising faculty member.
    FacultySupervisor,
    /// The department.
    Department,
    /// The school.
    School,
    /// The program.
    Program,
    /// An academic advisor.
    Advisor,
    /// The registrar.
    Registrar,
    /// Unclassified.
    Unknown,
}

impl PermissionAuthority {
    /// Parses a wire value, degrading unrecognized values to [`Self::Unknown`].
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "INSTRUCTOR" => Self::Instructor,
            "FACULTY_SUPERVISOR" => Self::FacultySupervisor,
            "DEPARTMENT" => Self::Department,
            "SCHOOL" => Self::School,
            "PROGRAM" => Self::Program,
            "ADVISOR" => Self::Advisor,
            "REGISTRAR" => Self::Registrar,
            _ => Self::Unknown,
        }
    }
}

/// What must happen for a permission to be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionAction {
    /// An approval is required.
    ApprovalRequired,
    /// A signature is required.
    SignatureRequired,
    /// A proposal must be approved.
    ProposalApproval,
    /// An application is required.
    ApplicationRequired,
    /// An override is required.
    OverrideRequired,
    /// Unclassified.
    Unknown,
}

impl PermissionAction {
    /// Parses a wire value, degrading unrecognized values to [`Self::Unknown`].
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "APPROVAL_REQUIRED" => Self::ApprovalRequired,
            "SIGNATURE_REQUIRED" => Self::SignatureRequired,
            "PROPOSAL_APPROVAL" => Self::ProposalApproval,
            "APPLICATION_REQUIRED" => Self::ApplicationRequired,
            "OVERRIDE_REQUIRED" => Self::OverrideRequired,
            _ => Self::Unknown,
        }
    }
}

/// Normalized class standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Standing {
    /// First-year standing.
    Freshman,
    /// Second-year standing.
    Sophomore,
    /// Third-year standing.
    Junior,
    /// Fourth-year standing.
    Senior,
    /// Graduate standing.
    Grad,
}

impl Standing {
    /// Parses a wire value. Standing phrases outside the fixed set stay
    /// unnormalized (`None`); that is not an error.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "FRESHMAN" => Some(Self::Freshman),
            "SOPHOMORE" => Some(Self::Sophomore),
            "JUNIOR" => Some(Self::Junior),
            "SENIOR" => Some(Self::Senior),
            "GRAD" => Some(Self::Grad),
            _ => None,
        }
    }
}

/// A free-text enrollment restriction with optional inferred tags.
///
/// Restrictions are displayed, never evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restriction {
    /// Exact text from the catalog.
    pub raw: String,
    /// Inferred tags, when the ingestion pipeline classified the text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub kinds: Vec<RestrictionKind>,
    /// Majors, programs, or courses the text mentions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<String>,
}

/// Inferred classification of a [`Restriction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum RestrictionKind {
    MajorOnly,
    ProgramOnly,
    ClassStandingOnly,
    CampusOnly,
    CollegeOnly,
    InstructorPermission,
    DepartmentPermission,
    AdvisorPermission,
    NotForMajor,
    NotForProgram,
    NoCreditIfTaken,
    RepeatLimit,
    CrossListed,
    TimeConflictRule,
    PriorCreditExclusion,
    Other,
}

impl RestrictionKind {
    /// Parses a wire value, degrading unrecognized values to [`Self::Other`].
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "MAJOR_ONLY" => Self::MajorOnly,
            "PROGRAM_ONLY" => Self::ProgramOnly,
            "CLASS_STANDING_ONLY" => Self::ClassStandingOnly,
            "CAMPUS_ONLY" => Self::CampusOnly,
            "COLLEGE_ONLY" => Self::CollegeOnly,
            "INSTRUCTOR_PERMISSION" => Self::InstructorPermission,
            "DEPARTMENT_PERMISSION" => Self::DepartmentPermission,
            "ADVISOR_PERMISSION" => Self::AdvisorPermission,
            "NOT_FOR_MAJOR" => Self::NotForMajor,
            "NOT_FOR_PROGRAM" => Self::NotForProgram,
            "NO_CREDIT_IF_TAKEN" => Self::NoCreditIfTaken,
            "REPEAT_LIMIT" => Self::RepeatLimit,
            "CROSS_LISTED" => Self::CrossListed,
            "TIME_CONFLICT_RULE" => Self::TimeConflictRule,
            "PRIOR_CREDIT_EXCLUSION" => Self::PriorCreditExclusion,
            _ => Self::Other,
        }
    }
}

// Serialization mirrors the ingestion wire format: a "type" tag of
// AND/OR/COURSE/PLACEMENT/PERMISSION/STANDING/SKILL, optional fields omitted.
// The AND and OR tags both fold into `Group`, which a derived tag cannot
// express, hence the manual impl.
impl Serialize for RequirementNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Group { kind, children } => {
                map.serialize_entry("type", kind.as_str())?;
                map.serialize_entry("children", children)?;
            }
            Self::Course { course, min_grade } => {
                map.serialize_entry("type", "COURSE")?;
                map.serialize_entry("course", course)?;
                if let Some(grade) = min_grade {
                    map.serialize_entry("min_grade", grade)?;
                }
            }
            Self::Placement {
                name,
                kind,
                subject,
                exam,
                min_course,
                level,
                min_score,
            } => {
                map.serialize_entry("type", "PLACEMENT")?;
                map.serialize_entry("name", name)?;
                if let Some(kind) = kind {
                    map.serialize_entry("placement_kind", kind)?;
                }
                if let Some(subject) = subject {
                    map.serialize_entry("subject", subject)?;
                }
                if let Some(exam) = exam {
                    map.serialize_entry("exam", exam)?;
                }
                if let Some(min_course) = min_course {
                    map.serialize_entry("min_course", min_course)?;
                }
                if let Some(level) = level {
                    map.serialize_entry("level", level)?;
                }
                if let Some(min_score) = min_score {
                    map.serialize_entry("min_score", min_score)?;
                }
            }
            Self::Permission {
                raw,
                kind,
                authority,
                action,
                artifacts,
            } => {
                map.serialize_entry("type", "PERMISSION")?;
                map.serialize_entry("raw", raw)?;
                if let Some(kind) = kind {
                    map.serialize_entry("permission_kind", kind)?;
                }
                if let Some(authority) = authority {
                    map.serialize_entry("authority", authority)?;
                }
                if let Some(action) = action {
                    map.serialize_entry("action", action)?;
                }
                if !artifacts.is_empty() {
                    map.serialize_entry("artifacts", artifacts)?;
                }
            }
            Self::Standing {
                standing,
                normalized,
            } => {
                map.serialize_entry("type", "STANDING")?;
                map.serialize_entry("standing", standing)?;
                if let Some(normalized) = normalized {
                    map.serialize_entry("normalized", normalized)?;
                }
            }
            Self::Skill { name } => {
                map.serialize_entry("type", "SKILL")?;
                map.serialize_entry("name", name)?;
            }
        }
        map.end()
    }
}

impl RequirementNode {
    /// Convenience constructor for a course leaf with no minimum grade.
    #[must_use]
    pub fn course(name: impl Into<String>) -> Self {
        Self::Course {
            course: name.into(),
            min_grade: None,
        }
    }

    /// Convenience constructor for a group.
    #[must_use]
    pub const fn group(kind: GroupKind, children: Vec<Self>) -> Self {
        Self::Group { kind, children }
    }
}
