//! Registration form state.
//!
//! `FormReconciler` owns the one draft being edited, keeps `balance` in step
//! with `camp_fee` and `deposit_paid`, tracks whether the draft has been
//! submitted, and projects the draft for the two print variants: the filled
//! form and the blank template.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, MemberStore};
use crate::models::{format_number, MemberRecord, Numeric};

// ============================================================================
// Fields and sections
// ============================================================================

/// Form sections in display and print order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Participant,
    EmergencyContact,
    Medical,
    Consent,
    Payment,
    OfficeUse,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Participant,
        Section::EmergencyContact,
        Section::Medical,
        Section::Consent,
        Section::Payment,
        Section::OfficeUse,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Participant => "Participant Information",
            Section::EmergencyContact => "Emergency Contact",
            Section::Medical => "Medical Information",
            Section::Consent => "Consent",
            Section::Payment => "Payment Details",
            Section::OfficeUse => "Office Use Only",
        }
    }

    pub fn fields(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |f| f.section() == self)
    }
}

/// Every editable attribute of a member, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    DateOfBirth,
    Age,
    Gender,
    Nationality,
    PhoneNumber,
    Email,
    ChurchName,
    Denomination,
    PastorName,
    EmergencyName,
    EmergencyRelationship,
    EmergencyPhone,
    EmergencyAltPhone,
    Allergies,
    ChronicIllnesses,
    Medications,
    ConsentSignature,
    ConsentDate,
    CampFee,
    DepositPaid,
    Balance,
    PaymentMethod,
    ReceiptNo,
    RegistrationNo,
    DateReceived,
    CheckedBy,
}

const FIELD_COUNT: usize = 27;

const GENDER_CHOICES: &[&str] = &["Male", "Female"];
const PAYMENT_CHOICES: &[&str] = &["Cash", "M-Pesa", "Bank Transfer"];

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::FullName,
        Field::DateOfBirth,
        Field::Age,
        Field::Gender,
        Field::Nationality,
        Field::PhoneNumber,
        Field::Email,
        Field::ChurchName,
        Field::Denomination,
        Field::PastorName,
        Field::EmergencyName,
        Field::EmergencyRelationship,
        Field::EmergencyPhone,
        Field::EmergencyAltPhone,
        Field::Allergies,
        Field::ChronicIllnesses,
        Field::Medications,
        Field::ConsentSignature,
        Field::ConsentDate,
        Field::CampFee,
        Field::DepositPaid,
        Field::Balance,
        Field::PaymentMethod,
        Field::ReceiptNo,
        Field::RegistrationNo,
        Field::DateReceived,
        Field::CheckedBy,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Wire name, as used by the member store
    pub fn name(&self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::DateOfBirth => "date_of_birth",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Nationality => "nationality",
            Field::PhoneNumber => "phone_number",
            Field::Email => "email",
            Field::ChurchName => "church_name",
            Field::Denomination => "denomination",
            Field::PastorName => "pastor_name",
            Field::EmergencyName => "emergency_name",
            Field::EmergencyRelationship => "emergency_relationship",
            Field::EmergencyPhone => "emergency_phone",
            Field::EmergencyAltPhone => "emergency_alt_phone",
            Field::Allergies => "allergies",
            Field::ChronicIllnesses => "chronic_illnesses",
            Field::Medications => "medications",
            Field::ConsentSignature => "consent_signature",
            Field::ConsentDate => "consent_date",
            Field::CampFee => "camp_fee",
            Field::DepositPaid => "deposit_paid",
            Field::Balance => "balance",
            Field::PaymentMethod => "payment_method",
            Field::ReceiptNo => "receipt_no",
            Field::RegistrationNo => "registration_no",
            Field::DateReceived => "date_received",
            Field::CheckedBy => "checked_by",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::DateOfBirth => "Date of Birth",
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Nationality => "Nationality",
            Field::PhoneNumber => "Phone Number",
            Field::Email => "Email",
            Field::ChurchName => "Church Name",
            Field::Denomination => "Denomination",
            Field::PastorName => "Pastor/Youth Leader",
            Field::EmergencyName => "Full Name",
            Field::EmergencyRelationship => "Relationship",
            Field::EmergencyPhone => "Phone Number",
            Field::EmergencyAltPhone => "Alternative Phone",
            Field::Allergies => "Allergies",
            Field::ChronicIllnesses => "Chronic Illnesses",
            Field::Medications => "Medications",
            Field::ConsentSignature => "Signature",
            Field::ConsentDate => "Date",
            Field::CampFee => "Camp Fee (KES)",
            Field::DepositPaid => "Deposit Paid (KES)",
            Field::Balance => "Balance (KES)",
            Field::PaymentMethod => "Payment Method",
            Field::ReceiptNo => "Receipt No",
            Field::RegistrationNo => "Registration No",
            Field::DateReceived => "Date Received",
            Field::CheckedBy => "Checked By",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Field::FullName
            | Field::DateOfBirth
            | Field::Age
            | Field::Gender
            | Field::Nationality
            | Field::PhoneNumber
            | Field::Email
            | Field::ChurchName
            | Field::Denomination
            | Field::PastorName => Section::Participant,
            Field::EmergencyName
            | Field::EmergencyRelationship
            | Field::EmergencyPhone
            | Field::EmergencyAltPhone => Section::EmergencyContact,
            Field::Allergies | Field::ChronicIllnesses | Field::Medications => Section::Medical,
            Field::ConsentSignature | Field::ConsentDate => Section::Consent,
            Field::CampFee
            | Field::DepositPaid
            | Field::Balance
            | Field::PaymentMethod
            | Field::ReceiptNo => Section::Payment,
            Field::RegistrationNo | Field::DateReceived | Field::CheckedBy => Section::OfficeUse,
        }
    }

    /// Required at creation: the identity and affiliation fields
    pub fn is_required(&self) -> bool {
        self.section() == Section::Participant
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::Age | Field::CampFee | Field::DepositPaid | Field::Balance
        )
    }

    /// Closed choice list for select-style fields, empty for free text
    pub fn choices(&self) -> &'static [&'static str] {
        match self {
            Field::Gender => GENDER_CHOICES,
            Field::PaymentMethod => PAYMENT_CHOICES,
            _ => &[],
        }
    }

    pub fn next(&self) -> Field {
        Field::ALL[(self.index() + 1) % FIELD_COUNT]
    }

    pub fn prev(&self) -> Field {
        Field::ALL[(self.index() + FIELD_COUNT - 1) % FIELD_COUNT]
    }
}

// ============================================================================
// Draft and projection
// ============================================================================

/// Text value of every field; a missing value is the empty string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormDraft {
    values: [String; FIELD_COUNT],
}

impl FormDraft {
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    fn set(&mut self, field: Field, value: String) {
        self.values[field.index()] = value;
    }

    pub fn numeric(&self, field: Field) -> Numeric {
        Numeric::parse(self.get(field))
    }

    /// Required fields that are empty or whitespace, in form order
    pub fn missing_required(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).trim().is_empty())
            .collect()
    }

    /// Convert to the store's record shape. Empty text becomes null; numeric
    /// fields are parsed.
    pub fn to_record(&self) -> MemberRecord {
        let text = |f: Field| {
            let v = self.get(f);
            if v.is_empty() {
                None
            } else {
                Some(v.to_string())
            }
        };
        MemberRecord {
            id: None,
            full_name: text(Field::FullName),
            date_of_birth: text(Field::DateOfBirth),
            age: self.numeric(Field::Age),
            gender: text(Field::Gender),
            nationality: text(Field::Nationality),
            phone_number: text(Field::PhoneNumber),
            email: text(Field::Email),
            church_name: text(Field::ChurchName),
            denomination: text(Field::Denomination),
            pastor_name: text(Field::PastorName),
            emergency_name: text(Field::EmergencyName),
            emergency_relationship: text(Field::EmergencyRelationship),
            emergency_phone: text(Field::EmergencyPhone),
            emergency_alt_phone: text(Field::EmergencyAltPhone),
            allergies: text(Field::Allergies),
            chronic_illnesses: text(Field::ChronicIllnesses),
            medications: text(Field::Medications),
            consent_signature: text(Field::ConsentSignature),
            consent_date: text(Field::ConsentDate),
            camp_fee: self.numeric(Field::CampFee),
            deposit_paid: self.numeric(Field::DepositPaid),
            balance: self.numeric(Field::Balance),
            payment_method: text(Field::PaymentMethod),
            receipt_no: text(Field::ReceiptNo),
            registration_no: text(Field::RegistrationNo),
            date_received: text(Field::DateReceived),
            checked_by: text(Field::CheckedBy),
        }
    }
}

/// Which physical variant a render produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// The draft's actual values
    #[default]
    Filled,
    /// Every value blanked, for a hand-filled template
    Blank,
}

impl RenderMode {
    pub fn toggle(self) -> Self {
        match self {
            RenderMode::Filled => RenderMode::Blank,
            RenderMode::Blank => RenderMode::Filled,
        }
    }
}

/// Read-only view of a draft in one render mode
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    draft: &'a FormDraft,
    mode: RenderMode,
}

impl<'a> Projection<'a> {
    pub fn new(draft: &'a FormDraft, mode: RenderMode) -> Self {
        Self { draft, mode }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn display(&self, field: Field) -> &'a str {
        match self.mode {
            RenderMode::Filled => self.draft.get(field),
            RenderMode::Blank => "",
        }
    }
}

// ============================================================================
// Reconciler
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    /// Accepted by the store; the draft is kept for printing
    Submitted,
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    Validation { missing: Vec<Field> },

    #[error("This registration was already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Store(#[from] ApiError),
}

pub struct FormReconciler {
    draft: FormDraft,
    state: FormState,
    render_mode: RenderMode,
    default_fee: f64,
    submitted: Option<MemberRecord>,
}

impl FormReconciler {
    pub fn new(default_fee: f64) -> Self {
        Self {
            draft: Self::default_draft(default_fee),
            state: FormState::Editing,
            render_mode: RenderMode::Filled,
            default_fee,
            submitted: None,
        }
    }

    fn default_draft(default_fee: f64) -> FormDraft {
        let mut draft = FormDraft::default();
        let fee = format_number(default_fee);
        draft.set(Field::CampFee, fee.clone());
        draft.set(Field::Balance, fee);
        draft
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state == FormState::Submitted
    }

    /// A submitted draft is what gets printed, so it stays frozen until `reset`
    pub fn is_editable(&self) -> bool {
        self.state == FormState::Editing
    }

    /// The record as accepted by the store, once submitted
    pub fn submitted_record(&self) -> Option<&MemberRecord> {
        self.submitted.as_ref()
    }

    pub fn value(&self, field: Field) -> &str {
        self.draft.get(field)
    }

    /// Replace one field. Editing the fee or the deposit recomputes the balance;
    /// an operand that is not a number counts as 0. Ignored once submitted.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if !self.is_editable() {
            debug!(field = field.name(), "Ignoring edit of a submitted registration");
            return;
        }
        self.draft.set(field, value.into());
        if matches!(field, Field::CampFee | Field::DepositPaid) {
            let balance = self.draft.numeric(Field::CampFee).value_or_zero()
                - self.draft.numeric(Field::DepositPaid).value_or_zero();
            self.draft.set(Field::Balance, format_number(balance));
        }
    }

    /// Move a select-style field to its next (or previous) choice.
    /// An empty or unknown value moves to the first (or last) choice.
    pub fn cycle_choice(&mut self, field: Field, forward: bool) {
        let choices = field.choices();
        if choices.is_empty() {
            return;
        }
        let current = choices.iter().position(|c| *c == self.draft.get(field));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % choices.len(),
            (Some(i), false) => (i + choices.len() - 1) % choices.len(),
            (None, true) => 0,
            (None, false) => choices.len() - 1,
        };
        self.set_field(field, choices[next]);
    }

    /// Start a new registration from the default draft
    pub fn reset(&mut self) {
        self.draft = Self::default_draft(self.default_fee);
        self.state = FormState::Editing;
        self.submitted = None;
        debug!("Registration form reset");
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn toggle_render_mode(&mut self) {
        self.render_mode = self.render_mode.toggle();
    }

    /// Field text in the current render mode
    pub fn display(&self, field: Field) -> &str {
        self.projection(self.render_mode).display(field)
    }

    pub fn projection(&self, mode: RenderMode) -> Projection<'_> {
        Projection::new(&self.draft, mode)
    }

    /// The filled form is only printed once the store accepted it
    pub fn can_print_filled(&self) -> bool {
        self.is_submitted()
    }

    /// Validate and convert the draft for submission. Leaves all state untouched.
    pub fn prepare_submission(&self) -> Result<MemberRecord, FormError> {
        if self.is_submitted() {
            return Err(FormError::AlreadySubmitted);
        }
        let missing = self.draft.missing_required();
        if !missing.is_empty() {
            debug!(missing = missing.len(), "Submission blocked by empty required fields");
            return Err(FormError::Validation { missing });
        }
        Ok(self.draft.to_record())
    }

    /// Apply the store's answer to a prepared submission.
    /// A failure leaves the draft and state as they were.
    pub fn complete_submission(
        &mut self,
        result: Result<MemberRecord, ApiError>,
    ) -> Result<MemberRecord, FormError> {
        match result {
            Ok(created) => {
                info!(id = ?created.id, "Member registered");
                self.state = FormState::Submitted;
                self.submitted = Some(created.clone());
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, "Member registration failed");
                Err(FormError::Store(e))
            }
        }
    }

    /// Validate, send to the store and record the outcome
    pub async fn submit<S: MemberStore>(&mut self, store: &S) -> Result<MemberRecord, FormError> {
        let record = self.prepare_submission()?;
        let result = store.create_member(&record).await;
        self.complete_submission(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::models::MemberId;

    /// In-memory store recording what it was asked to create
    struct FakeStore {
        created: Mutex<Vec<MemberRecord>>,
        fail_with: Option<fn() -> ApiError>,
    }

    impl FakeStore {
        fn accepting() -> Self {
            Self { created: Mutex::new(vec![]), fail_with: None }
        }

        fn failing(f: fn() -> ApiError) -> Self {
            Self { created: Mutex::new(vec![]), fail_with: Some(f) }
        }
    }

    impl MemberStore for FakeStore {
        async fn list_members(&self) -> Result<Vec<MemberRecord>, ApiError> {
            Ok(self.created.lock().unwrap().clone())
        }

        async fn create_member(&self, member: &MemberRecord) -> Result<MemberRecord, ApiError> {
            if let Some(f) = self.fail_with {
                return Err(f());
            }
            let mut created = self.created.lock().unwrap();
            let mut record = member.clone();
            record.id = Some(MemberId::new((created.len() + 1).to_string()));
            created.push(record.clone());
            Ok(record)
        }

        async fn get_member(&self, id: &MemberId) -> Result<MemberRecord, ApiError> {
            self.created
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.id.as_ref() == Some(id))
                .cloned()
                .ok_or_else(|| ApiError::NotFound(id.to_string()))
        }

        async fn delete_member(&self, _id: &MemberId) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn filled_form() -> FormReconciler {
        let mut form = FormReconciler::new(5000.0);
        form.set_field(Field::FullName, "Alice Wanjiru");
        form.set_field(Field::DateOfBirth, "2004-03-01");
        form.set_field(Field::Age, "20");
        form.set_field(Field::Gender, "Female");
        form.set_field(Field::Nationality, "Kenyan");
        form.set_field(Field::PhoneNumber, "0712345678");
        form.set_field(Field::Email, "alice@example.com");
        form.set_field(Field::ChurchName, "Grace Chapel");
        form.set_field(Field::Denomination, "Baptist");
        form.set_field(Field::PastorName, "Rev. Otieno");
        form
    }

    #[test]
    fn test_field_metadata() {
        assert_eq!(Field::ALL.len(), 27);
        for f in Field::ALL {
            assert_eq!(Field::from_name(f.name()), Some(f));
        }
        let required: Vec<&str> = Field::ALL
            .into_iter()
            .filter(|f| f.is_required())
            .map(|f| f.name())
            .collect();
        assert_eq!(
            required,
            vec![
                "full_name", "date_of_birth", "age", "gender", "nationality",
                "phone_number", "email", "church_name", "denomination", "pastor_name",
            ]
        );
        assert_eq!(Field::CheckedBy.next(), Field::FullName);
        assert_eq!(Field::FullName.prev(), Field::CheckedBy);
        let total: usize = Section::ALL.iter().map(|s| s.fields().count()).sum();
        assert_eq!(total, 27);
    }

    #[test]
    fn test_default_draft_prefills_fee_and_balance() {
        let form = FormReconciler::new(5000.0);
        assert_eq!(form.value(Field::CampFee), "5000");
        assert_eq!(form.value(Field::Balance), "5000");
        assert_eq!(form.value(Field::DepositPaid), "");
        assert_eq!(form.state(), FormState::Editing);
    }

    #[test]
    fn test_deposit_edit_recomputes_balance() {
        let mut form = FormReconciler::new(5000.0);
        form.set_field(Field::DepositPaid, "1500");
        assert_eq!(form.value(Field::Balance), "3500");
    }

    #[test]
    fn test_balance_tracks_every_fee_and_deposit_edit() {
        let mut form = FormReconciler::new(0.0);
        let edits = [
            (Field::CampFee, "7200.50"),
            (Field::DepositPaid, "200.25"),
            (Field::CampFee, "100"),
            (Field::DepositPaid, "350"),
        ];
        for (field, value) in edits {
            form.set_field(field, value);
            let fee: f64 = form.value(Field::CampFee).parse().unwrap();
            let deposit: f64 = form.value(Field::DepositPaid).parse().unwrap_or(0.0);
            let balance: f64 = form.value(Field::Balance).parse().unwrap();
            assert!((balance - (fee - deposit)).abs() < 1e-9);
        }
        assert_eq!(form.value(Field::Balance), "-250");
    }

    #[test]
    fn test_unparseable_operand_counts_as_zero() {
        let mut form = FormReconciler::new(5000.0);
        form.set_field(Field::DepositPaid, "abc");
        assert_eq!(form.value(Field::DepositPaid), "abc");
        assert_eq!(form.value(Field::Balance), "5000");
        form.set_field(Field::CampFee, "");
        assert_eq!(form.value(Field::Balance), "0");
    }

    #[test]
    fn test_other_fields_stored_verbatim() {
        let mut form = FormReconciler::new(5000.0);
        form.set_field(Field::Balance, "12");
        form.set_field(Field::Age, " 19 ");
        assert_eq!(form.value(Field::Balance), "12");
        assert_eq!(form.value(Field::Age), " 19 ");
    }

    #[test]
    fn test_blank_mode_hides_every_value() {
        let form = filled_form();
        let blank = form.projection(RenderMode::Blank);
        let filled = form.projection(RenderMode::Filled);
        for f in Field::ALL {
            assert_eq!(blank.display(f), "");
            assert_eq!(filled.display(f), form.value(f));
        }
    }

    #[test]
    fn test_toggling_render_mode_keeps_draft() {
        let mut form = filled_form();
        let before = form.draft().clone();
        form.toggle_render_mode();
        assert_eq!(form.render_mode(), RenderMode::Blank);
        assert_eq!(form.display(Field::FullName), "");
        form.toggle_render_mode();
        assert_eq!(form.display(Field::FullName), "Alice Wanjiru");
        assert_eq!(form.draft(), &before);
    }

    #[test]
    fn test_cycle_choice() {
        let mut form = FormReconciler::new(5000.0);
        form.cycle_choice(Field::PaymentMethod, true);
        assert_eq!(form.value(Field::PaymentMethod), "Cash");
        form.cycle_choice(Field::PaymentMethod, false);
        assert_eq!(form.value(Field::PaymentMethod), "Bank Transfer");
        form.cycle_choice(Field::Gender, false);
        assert_eq!(form.value(Field::Gender), "Female");
        form.cycle_choice(Field::FullName, true);
        assert_eq!(form.value(Field::FullName), "");
    }

    #[test]
    fn test_to_record_converts_numbers_and_empties() {
        let mut form = filled_form();
        form.set_field(Field::DepositPaid, "2000");
        let record = form.draft().to_record();
        assert_eq!(record.age, Numeric::Number(20.0));
        assert_eq!(record.camp_fee, Numeric::Number(5000.0));
        assert_eq!(record.balance, Numeric::Number(3000.0));
        assert_eq!(record.allergies, None);

        form.set_field(Field::Balance, "");
        assert_eq!(form.draft().to_record().balance, Numeric::Empty);
    }

    #[tokio::test]
    async fn test_submit_with_missing_name_fails_validation() {
        let store = FakeStore::accepting();
        let mut form = filled_form();
        form.set_field(Field::FullName, "");
        let before = form.draft().clone();

        let err = form.submit(&store).await.unwrap_err();
        match err {
            FormError::Validation { missing } => assert_eq!(missing, vec![Field::FullName]),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(form.draft(), &before);
        assert!(!form.is_submitted());
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_only_required_field_is_missing() {
        let store = FakeStore::accepting();
        let mut form = filled_form();
        form.set_field(Field::Email, "   ");
        assert!(matches!(
            form.submit(&store).await,
            Err(FormError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_successful_submit_retains_draft() {
        let store = FakeStore::accepting();
        let mut form = filled_form();
        let before = form.draft().clone();

        let created = form.submit(&store).await.unwrap();
        assert_eq!(created.id, Some(MemberId::new("1")));
        assert!(form.is_submitted());
        assert!(form.can_print_filled());
        assert_eq!(form.draft(), &before);
        assert_eq!(
            form.submitted_record().and_then(|m| m.id.clone()),
            Some(MemberId::new("1"))
        );

        let sent = store.created.lock().unwrap();
        assert_eq!(sent[0].age, Numeric::Number(20.0));
        assert_eq!(sent[0].deposit_paid, Numeric::Empty);
    }

    #[tokio::test]
    async fn test_store_failure_leaves_state_untouched() {
        let store = FakeStore::failing(|| ApiError::Validation("Email already registered".into()));
        let mut form = filled_form();
        let before = form.draft().clone();

        let err = form.submit(&store).await.unwrap_err();
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(form.state(), FormState::Editing);
        assert_eq!(form.draft(), &before);
    }

    #[tokio::test]
    async fn test_expired_session_is_distinguishable() {
        let store = FakeStore::failing(|| ApiError::Unauthorized);
        let mut form = filled_form();
        match form.submit(&store).await {
            Err(FormError::Store(e)) => assert!(e.is_session_expired()),
            other => panic!("unexpected result: {:?}", other.map(|m| m.id)),
        }
    }

    #[tokio::test]
    async fn test_reset_returns_to_editing() {
        let store = FakeStore::accepting();
        let mut form = filled_form();
        form.submit(&store).await.unwrap();

        form.reset();
        assert_eq!(form.state(), FormState::Editing);
        assert!(!form.can_print_filled());
        assert!(form.submitted_record().is_none());
        assert_eq!(form.value(Field::FullName), "");
        assert_eq!(form.value(Field::CampFee), "5000");
        assert_eq!(form.value(Field::Balance), "5000");
    }

    #[tokio::test]
    async fn test_submitted_draft_is_frozen() {
        let store = FakeStore::accepting();
        let mut form = filled_form();
        form.submit(&store).await.unwrap();
        let accepted = form.draft().clone();

        form.set_field(Field::FullName, "Alice Wanjiru EDITED");
        form.set_field(Field::DepositPaid, "999");
        form.cycle_choice(Field::Gender, true);
        assert!(!form.is_editable());
        assert_eq!(form.draft(), &accepted);
        assert_eq!(
            form.projection(RenderMode::Filled).display(Field::FullName),
            "Alice Wanjiru"
        );

        assert!(matches!(form.submit(&store).await, Err(FormError::AlreadySubmitted)));
        assert_eq!(store.created.lock().unwrap().len(), 1);

        form.reset();
        form.set_field(Field::FullName, "Beth");
        assert_eq!(form.value(Field::FullName), "Beth");
    }
}
