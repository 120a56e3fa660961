//! The four customer inputs collected by the form.

use std::ops::RangeInclusive;

/// Allowed tenure in months.
pub const TENURE_RANGE: RangeInclusive<u32> = 0..=72;
/// Allowed monthly charge.
pub const MONTHLY_CHARGES_RANGE: RangeInclusive<f64> = 0.0..=200.0;
pub const DEFAULT_TENURE: u32 = 12;
pub const DEFAULT_MONTHLY_CHARGES: f64 = 70.0;

/// Closed set of labels that encode to a small integer code.
///
/// The codes must match the label encoding used when the model was trained.
pub trait CategoryOption: Copy + PartialEq + 'static {
    /// Every option in display order.
    const ALL: &'static [Self];

    /// Label shown in the form, identical to the training data values.
    fn label(self) -> &'static str;

    /// Short command-line spelling.
    fn slug(self) -> &'static str;

    /// Integer written into the feature row.
    fn code(self) -> u8;

    /// Match a label or slug, ignoring ASCII case and surrounding whitespace.
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.iter().copied().find(|option| {
            option.label().eq_ignore_ascii_case(text) || option.slug().eq_ignore_ascii_case(text)
        })
    }
}

/// Contract term of the customer account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContractType {
    #[default]
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl CategoryOption for ContractType {
    const ALL: &'static [Self] = &[Self::MonthToMonth, Self::OneYear, Self::TwoYear];

    fn label(self) -> &'static str {
        match self {
            Self::MonthToMonth => "Month-to-month",
            Self::OneYear => "One year",
            Self::TwoYear => "Two year",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::MonthToMonth => "month-to-month",
            Self::OneYear => "one-year",
            Self::TwoYear => "two-year",
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::MonthToMonth => 0,
            Self::OneYear => 1,
            Self::TwoYear => 2,
        }
    }
}

/// Internet service subscribed by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InternetService {
    #[default]
    Dsl,
    FiberOptic,
    No,
}

impl CategoryOption for InternetService {
    const ALL: &'static [Self] = &[Self::Dsl, Self::FiberOptic, Self::No];

    fn label(self) -> &'static str {
        match self {
            Self::Dsl => "DSL",
            Self::FiberOptic => "Fiber optic",
            Self::No => "No",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Dsl => "dsl",
            Self::FiberOptic => "fiber",
            Self::No => "none",
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::Dsl => 0,
            Self::FiberOptic => 1,
            Self::No => 2,
        }
    }
}

/// Current values of the four form controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserSelection {
    pub tenure: u32,
    pub monthly_charges: f64,
    pub contract: ContractType,
    pub internet: InternetService,
}

impl Default for UserSelection {
    fn default() -> Self {
        Self {
            tenure: DEFAULT_TENURE,
            monthly_charges: DEFAULT_MONTHLY_CHARGES,
            contract: ContractType::default(),
            internet: InternetService::default(),
        }
    }
}

impl UserSelection {
    /// Pull numeric inputs back inside their declared bounds.
    pub fn clamped(self) -> Self {
        let charges = if self.monthly_charges.is_nan() {
            *MONTHLY_CHARGES_RANGE.start()
        } else {
            self.monthly_charges
                .clamp(*MONTHLY_CHARGES_RANGE.start(), *MONTHLY_CHARGES_RANGE.end())
        };
        Self {
            tenure: self
                .tenure
                .clamp(*TENURE_RANGE.start(), *TENURE_RANGE.end()),
            monthly_charges: charges,
            ..self
        }
    }
}
