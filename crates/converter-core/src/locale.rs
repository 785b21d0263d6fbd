//! User-facing strings in Bangla and English.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Bn,
    En,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Messages {
    pub title: &'static str,
    pub login: &'static str,
    pub register: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub reset: &'static str,
    pub theme: &'static str,
    pub history: &'static str,
    pub converter_options: &'static str,
    pub logout: &'static str,
    pub invalid_credentials: &'static str,
    pub username_exists: &'static str,
    pub registration_success: &'static str,
    pub login_success: &'static str,
    pub saved: &'static str,
    pub coming_soon: &'static str,
    pub history_empty: &'static str,
}

static BN: Messages = Messages {
    title: "বাংলা কনভার্টার",
    login: "লগইন",
    register: "রেজিস্টার",
    username: "ইউজারনেম",
    password: "পাসওয়ার্ড",
    reset: "পাসওয়ার্ড রিসেট",
    theme: "থিম",
    history: "হিস্টোরি",
    converter_options: "কনভার্টার অপশন",
    logout: "লগআউট",
    invalid_credentials: "ইউজারনেম অথবা পাসওয়ার্ড ভুল",
    username_exists: "ইউজারনেম ইতিমধ্যে আছে",
    registration_success: "নিবন্ধন সফল হয়েছে",
    login_success: "লগইন সফল হয়েছে",
    saved: "সংরক্ষিত হয়েছে",
    coming_soon: "শীঘ্রই আসছে",
    history_empty: "কোনো হিস্টোরি নেই",
};

static EN: Messages = Messages {
    title: "Bangla Converter",
    login: "Login",
    register: "Register",
    username: "Username",
    password: "Password",
    reset: "Reset Password",
    theme: "Theme",
    history: "History",
    converter_options: "Converter Options",
    logout: "Logout",
    invalid_credentials: "Invalid username or password",
    username_exists: "This username already exists",
    registration_success: "Registration successful",
    login_success: "Login successful",
    saved: "Saved",
    coming_soon: "Coming soon",
    history_empty: "No history yet",
};

impl Language {
    pub fn messages(self) -> &'static Messages {
        match self {
            Language::Bn => &BN,
            Language::En => &EN,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::Bn => Language::En,
            Language::En => Language::Bn,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Bn => "bn",
            Language::En => "en",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Language::Bn.toggled(), Language::En);
        assert_eq!(Language::Bn.toggled().toggled(), Language::Bn);
    }

    #[test]
    fn tables_differ_per_language() {
        assert_eq!(
            Language::En.messages().invalid_credentials,
            "Invalid username or password"
        );
        assert_ne!(Language::Bn.messages(), Language::En.messages());
    }
}
