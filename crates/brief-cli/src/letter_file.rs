//! TOML letter description
//!
//! ```toml
//! recipient = """
//! Erika Mustermann
//! Heidestraße 17
//! 51147 Köln"""
//! subject = "Rechnung"
//! salutation = "Sehr geehrte Frau Mustermann,"
//! closing = "Mit freundlichen Grüßen"
//! content = "anbei die Rechnung."
//! date_with_city = true
//!
//! [sender]
//! name = "John Doe"
//! street = "Musterweg 1"
//! city = "10115 Berlin"
//!
//! [marks]
//! fold = false
//! ```

use brief_core::{escape, BankDetails, Letter, PhoneNumbers, Result, Sender};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format of the date line, e.g. `24.12.2024`
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// A complete letter as written by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterFile {
    pub sender: SenderSection,
    pub contact: ContactSection,
    pub bank: Option<BankSection>,
    pub marks: MarksSection,
    /// Recipient address, one line per address line
    pub recipient: String,
    pub subject: String,
    pub salutation: String,
    pub closing: String,
    /// Defaults to the sender name
    pub signature: Option<String>,
    /// Letter body; line breaks are kept
    pub content: String,
    /// Defaults to today
    pub date: Option<String>,
    /// Prefix the date with the sender's city, without the postcode
    pub date_with_city: bool,
    pub enclosures: Vec<String>,
    pub distribution: String,
    pub your_reference: String,
    pub my_reference: String,
    pub your_letter: String,
    pub mail_note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderSection {
    pub name: String,
    pub street: String,
    /// Postcode and city, e.g. `10115 Berlin`
    pub city: String,
    pub country: String,
    pub addition: String,
    pub return_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSection {
    pub phone: String,
    pub fax: String,
    pub telex: String,
    pub email: String,
    pub homepage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankSection {
    pub name: String,
    pub code: String,
    pub account: String,
}

/// Page marks; unset entries keep the class defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarksSection {
    pub hole: Option<bool>,
    pub fold: Option<bool>,
    pub window: Option<bool>,
    pub separator_lines: Option<bool>,
    pub classic: Option<bool>,
    pub our_reference: Option<bool>,
}

impl LetterFile {
    /// Parse a letter from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Keys of required entries that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("sender.name", &self.sender.name),
            ("sender.street", &self.sender.street),
            ("sender.city", &self.sender.city),
            ("recipient", &self.recipient),
            ("content", &self.content),
            ("subject", &self.subject),
            ("salutation", &self.salutation),
            ("closing", &self.closing),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    /// Text of the date line
    ///
    /// With `date_with_city` the city is taken from the sender's city line
    /// with the leading postcode removed: `24.12.2024, Berlin`.
    pub fn date_line(&self, today: NaiveDate) -> String {
        let date = match &self.date {
            Some(date) => date.clone(),
            None => today.format(DATE_FORMAT).to_string(),
        };
        if !self.date_with_city {
            return date;
        }

        let city = self.sender.city.trim();
        let city = city.split_once(' ').map_or(city, |(_, rest)| rest.trim());
        if city.is_empty() {
            date
        } else {
            format!("{date}, {city}")
        }
    }

    /// Copy every entry into `letter`, escaping free text on the way
    pub fn apply(&self, letter: &mut Letter, today: NaiveDate) -> Result<()> {
        let sender = &self.sender;
        letter.set_sender(
            Sender::new(escape(&sender.name), escape(&sender.street), escape(&sender.city))
                .with_country(escape(&sender.country))
                .with_addition(escape(&sender.addition))
                .with_return_address(escape(&sender.return_address)),
        )?;
        let signature = self.signature.as_deref().unwrap_or(&sender.name);
        letter.set_signature(escape(signature))?;

        let contact = &self.contact;
        letter.set_phone_numbers(PhoneNumbers {
            phone: escape(&contact.phone),
            fax: escape(&contact.fax),
            telex: escape(&contact.telex),
        })?;
        letter.set_email(escape(&contact.email))?;
        letter.set_homepage(escape(&contact.homepage))?;

        if let Some(bank) = &self.bank {
            letter.set_bank(BankDetails {
                bank: escape(&bank.name),
                code: escape(&bank.code),
                account: escape(&bank.account),
            })?;
        }

        self.marks.apply(letter)?;

        letter.set_recipient_text(&self.recipient)?;
        letter.set_content(&self.content)?;
        letter.set_subject(escape(&self.subject))?;
        letter.set_salutation(escape(&self.salutation))?;
        letter.set_closing(escape(&self.closing))?;
        letter.set_date(escape(&self.date_line(today)))?;

        letter.set_enclosures(self.enclosures.iter().map(|e| escape(e)).collect())?;
        letter.set_distribution(escape(&self.distribution))?;
        letter.set_references(escape(&self.your_reference), escape(&self.my_reference))?;
        letter.set_your_letter(escape(&self.your_letter))?;
        letter.set_mail_note(escape(&self.mail_note))
    }
}

impl MarksSection {
    fn apply(&self, letter: &mut Letter) -> Result<()> {
        let setters: [(Option<bool>, fn(&mut Letter, bool) -> Result<()>); 6] = [
            (self.hole, Letter::set_hole_mark),
            (self.fold, Letter::set_fold_marks),
            (self.window, Letter::set_window_marks),
            (self.separator_lines, Letter::set_separator_lines),
            (self.classic, Letter::set_classic),
            (self.our_reference, Letter::set_our_reference_line),
        ];
        for (value, set) in setters {
            if let Some(on) = value {
                set(letter, on)?;
            }
        }
        Ok(())
    }
}
