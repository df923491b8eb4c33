//! Field catalogue of a `g-brief` letter
//!
//! The constants are the registry keys; [`g_brief`] builds the registry with
//! every field in the order the class expects its setup macros.

use crate::field::{Field, FieldRegistry};

// Layout switches
pub const LOCHERMARKE: &str = "lochermarke";
pub const FALTMARKEN: &str = "faltmarken";
pub const FENSTERMARKEN: &str = "fenstermarken";
pub const TRENNLINIEN: &str = "trennlinien";
pub const KLASSISCH: &str = "klassisch";
pub const UNSERZEICHEN: &str = "unserzeichen";

// Correspondence references
pub const IHRZEICHEN: &str = "ihrzeichen";
pub const IHRSCHREIBEN: &str = "ihrschreiben";
pub const MEINZEICHEN: &str = "meinzeichen";

// Sender address
pub const NAME: &str = "name";
pub const STRASSE: &str = "strasse";
pub const ZUSATZ: &str = "zusatz";
pub const RETOURADRESSE: &str = "retouradresse";
pub const ORT: &str = "ort";
pub const LAND: &str = "land";

// Contact
pub const TELEFON: &str = "telefon";
pub const TELEFAX: &str = "telefax";
pub const TELEX: &str = "telex";
pub const HTTP: &str = "http";
pub const EMAIL: &str = "email";

// Bank account
pub const BANK: &str = "bank";
pub const BLZ: &str = "blz";
pub const KONTO: &str = "konto";

// Recipient
pub const POSTVERMERK: &str = "postvermerk";
pub const ADRESSE: &str = "adresse";

// Letter content
pub const DATUM: &str = "datum";
pub const BETREFF: &str = "betreff";
pub const ANREDE: &str = "anrede";
pub const GRUSS: &str = "gruss";
pub const UNTERSCHRIFT: &str = "unterschrift";
pub const ANLAGEN: &str = "anlagen";
pub const VERTEILER: &str = "verteiler";
pub const TEXT: &str = "text";

/// Control token of the body field; it never reaches the document
pub const BODY_SENTINEL: &str = "text";

/// Registry holding every `g-brief` field with its default value
pub fn g_brief() -> FieldRegistry {
    FieldRegistry::from_catalogue(vec![
        Field::flag(LOCHERMARKE, "\\lochermarke", true),
        Field::flag(FALTMARKEN, "\\faltmarken", true),
        Field::flag(FENSTERMARKEN, "\\fenstermarken", true),
        Field::flag(TRENNLINIEN, "\\trennlinien", true),
        Field::flag(KLASSISCH, "\\klassisch", false),
        Field::flag(UNSERZEICHEN, "\\unserzeichen", false),
        Field::text(IHRZEICHEN, "\\IhrZeichen"),
        Field::text(IHRSCHREIBEN, "\\IhrSchreiben"),
        Field::text(MEINZEICHEN, "\\MeinZeichen"),
        Field::text(NAME, "\\Name"),
        Field::text(STRASSE, "\\Strasse"),
        Field::text(ZUSATZ, "\\Zusatz"),
        Field::text(RETOURADRESSE, "\\RetourAdresse"),
        Field::text(ORT, "\\Ort"),
        Field::text(LAND, "\\Land"),
        Field::text(TELEFON, "\\Telefon"),
        Field::text(TELEFAX, "\\Telefax"),
        Field::text(TELEX, "\\Telex"),
        Field::text(HTTP, "\\HTTP"),
        Field::text(EMAIL, "\\EMail"),
        Field::text(BANK, "\\Bank"),
        Field::text(BLZ, "\\BLZ"),
        Field::text(KONTO, "\\Konto"),
        Field::text(POSTVERMERK, "\\Postvermerk"),
        Field::lines(ADRESSE, "\\Adresse"),
        Field::text(DATUM, "\\Datum"),
        Field::text(BETREFF, "\\Betreff"),
        Field::text(ANREDE, "\\Anrede"),
        Field::text(GRUSS, "\\Gruss"),
        Field::text(UNTERSCHRIFT, "\\Unterschrift"),
        Field::lines(ANLAGEN, "\\Anlagen"),
        Field::text(VERTEILER, "\\Verteiler"),
        Field::body(TEXT, BODY_SENTINEL),
    ])
}

impl Default for FieldRegistry {
    fn default() -> Self {
        g_brief()
    }
}
