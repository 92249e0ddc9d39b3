// src/harvester/extractor.rs
use regex::Regex;

use crate::models::EmailSet;

pub struct EmailExtractor {
    email_regex: Regex,
}

impl EmailExtractor {
    pub fn new() -> Self {
        Self {
            email_regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap(),
        }
    }

    /// Matches email-like tokens in the given text. Case is kept as matched,
    /// duplicates collapse into the set.
    pub fn extract(&self, text: &str) -> EmailSet {
        self.email_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse_into_one_entry() {
        let extractor = EmailExtractor::new();
        let emails = extractor.extract("escribe a a@b.com o a a@b.com para reservar");

        assert_eq!(emails.len(), 1);
        assert!(emails.contains("a@b.com"));
    }

    #[test]
    fn extraction_is_idempotent_and_order_independent() {
        let extractor = EmailExtractor::new();

        let first = extractor.extract("ventas@tienda.es y soporte@tienda.es");
        let second = extractor.extract("ventas@tienda.es y soporte@tienda.es");
        let swapped = extractor.extract("soporte@tienda.es y ventas@tienda.es");

        assert_eq!(first, second);
        assert_eq!(first, swapped);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn case_is_preserved_as_matched() {
        let extractor = EmailExtractor::new();
        let emails = extractor.extract("Contacto: Info@Empresa.COM");

        assert!(emails.contains("Info@Empresa.COM"));
    }

    #[test]
    fn text_without_emails_yields_empty_set() {
        let extractor = EmailExtractor::new();
        assert!(extractor.extract("sin contacto visible @ ninguna parte").is_empty());
    }

    #[test]
    fn tld_needs_at_least_two_letters() {
        let extractor = EmailExtractor::new();
        assert!(extractor.extract("roto@dominio.x").is_empty());
        assert_eq!(extractor.extract("ok@dominio.xy").len(), 1);
    }

    #[test]
    fn local_part_special_characters_are_accepted() {
        let extractor = EmailExtractor::new();
        let emails = extractor.extract("pedidos+web@mi-tienda.co.uk");

        assert!(emails.contains("pedidos+web@mi-tienda.co.uk"));
    }
}
