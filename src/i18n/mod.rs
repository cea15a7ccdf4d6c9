use serde::Serialize;

use crate::core::ScenarioSet;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hebrew,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hebrew => "he",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "he" | "hebrew" | "עברית" => Some(Language::Hebrew),
            _ => None,
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Language::English => TextDirection::Ltr,
            Language::Hebrew => TextDirection::Rtl,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MessageId {
    Title,
    Intro,
    YearsUntilRetirement,
    YearsContributing,
    CurrentBalance,
    Salary,
    Run,
    ResultsTitle,
    MonthlyToggle,
    CustomAnnuity,
    GenderPrompt,
    MonthlyTitle,
    Male,
    Female,
    AnnuityFactorInput,
    Currency,
    PerMonth,
}

impl MessageId {
    pub const ALL: [MessageId; 17] = [
        MessageId::Title,
        MessageId::Intro,
        MessageId::YearsUntilRetirement,
        MessageId::YearsContributing,
        MessageId::CurrentBalance,
        MessageId::Salary,
        MessageId::Run,
        MessageId::ResultsTitle,
        MessageId::MonthlyToggle,
        MessageId::CustomAnnuity,
        MessageId::GenderPrompt,
        MessageId::MonthlyTitle,
        MessageId::Male,
        MessageId::Female,
        MessageId::AnnuityFactorInput,
        MessageId::Currency,
        MessageId::PerMonth,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MessageId::Title => "title",
            MessageId::Intro => "intro",
            MessageId::YearsUntilRetirement => "yearsUntilRetirement",
            MessageId::YearsContributing => "yearsContributing",
            MessageId::CurrentBalance => "currentBalance",
            MessageId::Salary => "salary",
            MessageId::Run => "run",
            MessageId::ResultsTitle => "resultsTitle",
            MessageId::MonthlyToggle => "monthlyToggle",
            MessageId::CustomAnnuity => "customAnnuity",
            MessageId::GenderPrompt => "genderPrompt",
            MessageId::MonthlyTitle => "monthlyTitle",
            MessageId::Male => "male",
            MessageId::Female => "female",
            MessageId::AnnuityFactorInput => "annuityFactorInput",
            MessageId::Currency => "currency",
            MessageId::PerMonth => "perMonth",
        }
    }
}

pub fn text(language: Language, id: MessageId) -> &'static str {
    match language {
        Language::English => english(id),
        Language::Hebrew => hebrew(id),
    }
}

fn english(id: MessageId) -> &'static str {
    match id {
        MessageId::Title => "📈 S&P 500 Pension Simulator",
        MessageId::Intro => "Estimate your pension balance with realistic return scenarios.",
        MessageId::YearsUntilRetirement => "Years until retirement:",
        MessageId::YearsContributing => {
            "How many of those years will you be actively contributing?"
        }
        MessageId::CurrentBalance => "Current pension balance (NIS):",
        MessageId::Salary => "Expected gross monthly salary (NIS):",
        MessageId::Run => "Run Simulation",
        MessageId::ResultsTitle => "📊 Estimated Total Pension Balance (after management fees):",
        MessageId::MonthlyToggle => "Show estimated monthly pension",
        MessageId::CustomAnnuity => "I want to enter a custom annuity factor",
        MessageId::GenderPrompt => "Your gender (for estimating annuity factor):",
        MessageId::MonthlyTitle => {
            "💰 Estimated Monthly Pension (Annuity Factor = {annuity_factor}):"
        }
        MessageId::Male => "Male",
        MessageId::Female => "Female",
        MessageId::AnnuityFactorInput => "Enter annuity factor",
        MessageId::Currency => "NIS",
        MessageId::PerMonth => "per month",
    }
}

fn hebrew(id: MessageId) -> &'static str {
    match id {
        MessageId::Title => "📈 מחשבון פנסיה לפי S&P 500",
        MessageId::Intro => "הערכת צבירת פנסיה על בסיס תרחישי תשואה ריאליים.",
        MessageId::YearsUntilRetirement => "כמה שנים עד לפרישה:",
        MessageId::YearsContributing => "כמה מהשנים האלה תפריש בפועל:",
        MessageId::CurrentBalance => "כמה יש לך כרגע בקרן (ש\"ח):",
        MessageId::Salary => "שכר חודשי ברוטו בעת עבודה (ש\"ח):",
        MessageId::Run => "חשב פנסיה",
        MessageId::ResultsTitle => "📊 סכום פנסיה כולל צפוי (לאחר דמי ניהול):",
        MessageId::MonthlyToggle => "הצג הערכת קצבה (המרה) חודשית",
        MessageId::CustomAnnuity => "אני רוצה להזין מקדם קצבה (המרה) בעצמי",
        MessageId::GenderPrompt => "מה המגדר שלך (לצורך מקדם):",
        MessageId::MonthlyTitle => "💰 קצבת פנסיה חודשית מוערכת (מקדם = {annuity_factor}):",
        MessageId::Male => "זכר",
        MessageId::Female => "נקבה",
        MessageId::AnnuityFactorInput => "הכנס מקדם",
        MessageId::Currency => "ש\"ח",
        MessageId::PerMonth => "לחודש",
    }
}

pub fn scenario_label(language: Language, key: &str) -> Option<&'static str> {
    let label = match (language, key) {
        (Language::English, ScenarioSet::VERY_OPTIMISTIC) => "Very Optimistic (10%)",
        (Language::English, ScenarioSet::OPTIMISTIC) => "Optimistic (7%)",
        (Language::English, ScenarioSet::REALISTIC) => "Realistic (6%)",
        (Language::English, ScenarioSet::CONSERVATIVE) => "Conservative (4%)",
        (Language::English, ScenarioSet::MINIMUM) => "Minimum Scenario (3%)",
        (Language::Hebrew, ScenarioSet::VERY_OPTIMISTIC) => "תרחיש אופטימי מאוד (10%)",
        (Language::Hebrew, ScenarioSet::OPTIMISTIC) => "תרחיש אופטימי (7%)",
        (Language::Hebrew, ScenarioSet::REALISTIC) => "תרחיש ריאלי (6%)",
        (Language::Hebrew, ScenarioSet::CONSERVATIVE) => "תרחיש שמרני (4%)",
        (Language::Hebrew, ScenarioSet::MINIMUM) => "תרחיש מינימלי (3%)",
        _ => return None,
    };
    Some(label)
}

pub fn monthly_title(language: Language, annuity_factor: f64) -> String {
    text(language, MessageId::MonthlyTitle).replace("{annuity_factor}", &annuity_factor.to_string())
}

pub fn catalog(language: Language) -> Vec<(&'static str, &'static str)> {
    MessageId::ALL
        .iter()
        .map(|&id| (id.key(), text(language, id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_round_trip() {
        for language in [Language::English, Language::Hebrew] {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
        assert_eq!(Language::from_code(" HE "), Some(Language::Hebrew));
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn hebrew_is_right_to_left() {
        assert_eq!(Language::Hebrew.direction(), TextDirection::Rtl);
        assert_eq!(Language::English.direction(), TextDirection::Ltr);
    }

    #[test]
    fn every_standard_scenario_has_a_label_in_every_language() {
        for language in [Language::English, Language::Hebrew] {
            for scenario in ScenarioSet::standard().iter() {
                assert!(
                    scenario_label(language, &scenario.key).is_some(),
                    "missing {} label for {}",
                    language.code(),
                    scenario.key
                );
            }
        }
        assert_eq!(
            scenario_label(Language::English, "realistic"),
            Some("Realistic (6%)")
        );
        assert_eq!(scenario_label(Language::English, "custom"), None);
    }

    #[test]
    fn monthly_title_fills_factor() {
        assert_eq!(
            monthly_title(Language::English, 205.0),
            "💰 Estimated Monthly Pension (Annuity Factor = 205):"
        );
        assert!(monthly_title(Language::Hebrew, 198.5).contains("מקדם = 198.5"));
    }

    #[test]
    fn catalog_covers_every_message_with_unique_keys() {
        let entries = catalog(Language::Hebrew);
        assert_eq!(entries.len(), MessageId::ALL.len());
        let mut keys = entries.iter().map(|(k, _)| *k).collect::<Vec<_>>();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), MessageId::ALL.len());
        assert!(entries.iter().all(|(_, v)| !v.is_empty()));
    }
}
