use serde::{Deserialize, Serialize};

/// Legal matter the user asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalCategory {
    ConsumerComplaint,
    PropertyDispute,
    FamilyMatter,
    EmploymentIssue,
    LandlordTenantDispute,
    PoliceComplaint,
    MotorAccidentClaim,
    BankFinancialIssue,
    PublicInterestLitigation,
    Other,
}

impl LegalCategory {
    pub const ALL: [LegalCategory; 10] = [
        LegalCategory::ConsumerComplaint,
        LegalCategory::PropertyDispute,
        LegalCategory::FamilyMatter,
        LegalCategory::EmploymentIssue,
        LegalCategory::LandlordTenantDispute,
        LegalCategory::PoliceComplaint,
        LegalCategory::MotorAccidentClaim,
        LegalCategory::BankFinancialIssue,
        LegalCategory::PublicInterestLitigation,
        LegalCategory::Other,
    ];

    /// Human readable label, also used verbatim in prompts
    pub fn label(&self) -> &'static str {
        match self {
            LegalCategory::ConsumerComplaint => "Consumer Complaint",
            LegalCategory::PropertyDispute => "Property Dispute",
            LegalCategory::FamilyMatter => "Family Matter (Divorce/Maintenance)",
            LegalCategory::EmploymentIssue => "Employment Issue",
            LegalCategory::LandlordTenantDispute => "Landlord-Tenant Dispute",
            LegalCategory::PoliceComplaint => "Police Complaint (FIR)",
            LegalCategory::MotorAccidentClaim => "Motor Accident Claim",
            LegalCategory::BankFinancialIssue => "Bank/Financial Issue",
            LegalCategory::PublicInterestLitigation => "Public Interest Litigation",
            LegalCategory::Other => "Other",
        }
    }

    /// Fields specific to this category, shown after the common personal fields.
    ///
    /// Categories without a dedicated form fall back to a description and amount.
    pub fn specific_fields(&self) -> &'static [FieldSpec] {
        match self {
            LegalCategory::ConsumerComplaint => CONSUMER_COMPLAINT_FIELDS,
            LegalCategory::PropertyDispute => PROPERTY_DISPUTE_FIELDS,
            LegalCategory::FamilyMatter => FAMILY_MATTER_FIELDS,
            LegalCategory::LandlordTenantDispute => LANDLORD_TENANT_FIELDS,
            LegalCategory::EmploymentIssue => EMPLOYMENT_FIELDS,
            LegalCategory::PoliceComplaint => POLICE_COMPLAINT_FIELDS,
            LegalCategory::MotorAccidentClaim
            | LegalCategory::BankFinancialIssue
            | LegalCategory::PublicInterestLitigation
            | LegalCategory::Other => GENERIC_FIELDS,
        }
    }

    /// Every field the form for this category asks for, in display order
    pub fn form_fields(&self) -> Vec<FieldSpec> {
        PERSONAL_FIELDS
            .iter()
            .chain(self.specific_fields())
            .chain(EVIDENCE_FIELDS)
            .copied()
            .collect()
    }
}

/// Output language of a drafted petition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetitionLanguage {
    English,
    Hindi,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
}

impl PetitionLanguage {
    pub const ALL: [PetitionLanguage; 6] = [
        PetitionLanguage::English,
        PetitionLanguage::Hindi,
        PetitionLanguage::Tamil,
        PetitionLanguage::Telugu,
        PetitionLanguage::Kannada,
        PetitionLanguage::Malayalam,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PetitionLanguage::English => "English",
            PetitionLanguage::Hindi => "Hindi",
            PetitionLanguage::Tamil => "Tamil",
            PetitionLanguage::Telugu => "Telugu",
            PetitionLanguage::Kannada => "Kannada",
            PetitionLanguage::Malayalam => "Malayalam",
        }
    }
}

// Keys of the collected form fields
pub mod field_keys {
    pub const NAME: &str = "name";
    pub const PHONE: &str = "phone";
    pub const EMAIL: &str = "email";
    pub const ADDRESS: &str = "address";
    pub const STATE: &str = "state";
    pub const DESCRIPTION: &str = "description";
    pub const DOCUMENTS: &str = "documents";
    pub const WITNESSES: &str = "witnesses";
    pub const ADDITIONAL_INFO: &str = "additional_info";
}

/// Fields that must be non-blank before details are accepted
pub const REQUIRED_FIELDS: [&str; 5] = [
    field_keys::NAME,
    field_keys::PHONE,
    field_keys::ADDRESS,
    field_keys::STATE,
    field_keys::DESCRIPTION,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Date,
    Amount,
    Select,
}

/// Description of a single form input
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub options: &'static [&'static str],
}

impl FieldSpec {
    const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            options: &[],
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn select(key: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Select,
            required: false,
            options,
        }
    }
}

const PERSONAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(field_keys::NAME, "Full Name", FieldKind::Text).required(),
    FieldSpec::new(field_keys::PHONE, "Phone Number", FieldKind::Text).required(),
    FieldSpec::new(field_keys::EMAIL, "Email", FieldKind::Text),
    FieldSpec::new(field_keys::ADDRESS, "Complete Address", FieldKind::LongText).required(),
    FieldSpec::select(field_keys::STATE, "State", &INDIAN_STATES).required(),
];

const EVIDENCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(field_keys::DOCUMENTS, "Documents you currently possess", FieldKind::LongText),
    FieldSpec::new(field_keys::WITNESSES, "Witness details", FieldKind::LongText),
    FieldSpec::new(field_keys::ADDITIONAL_INFO, "Any other relevant information", FieldKind::LongText),
];

const CONSUMER_COMPLAINT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("company_name", "Company/Service Provider Name", FieldKind::Text),
    FieldSpec::select(
        "complaint_nature",
        "Nature of Complaint",
        &[
            "Defective Product",
            "Poor Service",
            "Unfair Trade Practice",
            "Overcharging",
            "Insurance Claim Rejection",
            "Other",
        ],
    ),
    FieldSpec::new("purchase_date", "Purchase/Service Date", FieldKind::Date),
    FieldSpec::new("amount_involved", "Amount Involved (₹)", FieldKind::Amount),
    FieldSpec::new(field_keys::DESCRIPTION, "Describe your complaint in detail", FieldKind::LongText).required(),
];

const PROPERTY_DISPUTE_FIELDS: &[FieldSpec] = &[
    FieldSpec::select(
        "property_type",
        "Property Type",
        &["Residential", "Commercial", "Agricultural", "Plot/Land"],
    ),
    FieldSpec::select(
        "dispute_type",
        "Dispute Type",
        &[
            "Ownership Dispute",
            "Partition",
            "Boundary Dispute",
            "Illegal Possession",
            "Document Issues",
            "Other",
        ],
    ),
    FieldSpec::new("property_value", "Approximate Property Value (₹)", FieldKind::Amount),
    FieldSpec::new(field_keys::DESCRIPTION, "Describe the property dispute", FieldKind::LongText).required(),
];

const FAMILY_MATTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::select(
        "matter_type",
        "Type of Family Matter",
        &[
            "Divorce (Mutual Consent)",
            "Divorce (Contested)",
            "Child Custody",
            "Maintenance/Alimony",
            "Domestic Violence",
            "Property Rights",
        ],
    ),
    FieldSpec::new("marriage_date", "Date of Marriage", FieldKind::Date),
    FieldSpec::select("children", "Children involved?", &["No", "Yes"]),
    FieldSpec::new(field_keys::DESCRIPTION, "Describe your situation", FieldKind::LongText).required(),
];

const LANDLORD_TENANT_FIELDS: &[FieldSpec] = &[
    FieldSpec::select("user_type", "You are", &["Tenant", "Landlord"]),
    FieldSpec::select(
        "dispute_type",
        "Dispute Type",
        &[
            "Rent Issues",
            "Eviction Notice",
            "Deposit Return",
            "Property Damage",
            "Lease Violation",
            "Other",
        ],
    ),
    FieldSpec::new("monthly_rent", "Monthly Rent (₹)", FieldKind::Amount),
    FieldSpec::new(field_keys::DESCRIPTION, "Describe the dispute", FieldKind::LongText).required(),
];

const EMPLOYMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("role", "Your Role/Designation", FieldKind::Text),
    FieldSpec::select(
        "issue_type",
        "Issue Type",
        &[
            "Unfair Termination",
            "Salary/Wage Dispute",
            "Harassment",
            "Workplace Safety",
            "Leave/Benefits Issues",
            "Other",
        ],
    ),
    FieldSpec::new(field_keys::DESCRIPTION, "Describe your employment issue", FieldKind::LongText).required(),
];

const POLICE_COMPLAINT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("crime_type", "Type of Offense", FieldKind::Text),
    FieldSpec::new("date_of_incident", "Date of Incident", FieldKind::Date),
    FieldSpec::new("location_of_incident", "Location of Incident", FieldKind::Text),
    FieldSpec::new(field_keys::DESCRIPTION, "Describe the incident in detail", FieldKind::LongText).required(),
];

const GENERIC_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(field_keys::DESCRIPTION, "Describe your legal issue in detail", FieldKind::LongText).required(),
    FieldSpec::new("amount_involved", "Amount Involved, if any (₹)", FieldKind::Amount),
];

pub const INDIAN_STATES: [&str; 31] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
];
