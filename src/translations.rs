//! Translation linking.
//!
//! In multi-locale mode, documents of the same kind that share a slug are
//! translations of one another. The linker attaches to each document a
//! reduced reference to every sibling: its locale, its title, and the URL
//! the consuming site serves it under.
//!
//! URLs follow the site routing scheme. The default locale lives at the
//! root, every other locale under its own prefix:
//!
//! ```text
//! /{slug}                  page, default locale
//! /post/{slug}             post, default locale
//! /{locale}/{slug}         page, other locale
//! /{locale}/post/{slug}    post, other locale
//! ```

use crate::types::{Document, DocumentKind, TranslationRef};

/// Cross-link translated documents in place.
///
/// References are attached in document order, and every pairing is
/// symmetric: if `a` references `b`, then `b` references `a`. Documents
/// with no siblings keep an empty list. The pass is quadratic over the
/// document count, which stays cheap at content-repository scale.
pub fn link(documents: &mut [Document], default_locale: &str) {
    let linked: Vec<Vec<TranslationRef>> = documents
        .iter()
        .map(|doc| {
            documents
                .iter()
                .filter(|other| {
                    other.kind() == doc.kind()
                        && other.slug() == doc.slug()
                        && other.locale() != doc.locale()
                })
                .map(|other| TranslationRef {
                    locale: other.locale().to_string(),
                    title: other.title().to_string(),
                    url: document_url(other.kind(), other.slug(), other.locale(), default_locale),
                })
                .collect()
        })
        .collect();

    for (doc, translations) in documents.iter_mut().zip(linked) {
        *doc.translations_mut() = translations;
    }
}

/// The URL a document is served under.
pub fn document_url(kind: DocumentKind, slug: &str, locale: &str, default_locale: &str) -> String {
    let prefix = if locale == default_locale {
        String::new()
    } else {
        format!("/{locale}")
    };
    match kind {
        DocumentKind::Page => format!("{prefix}/{slug}"),
        DocumentKind::Post => format!("{prefix}/post/{slug}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{page, post};

    fn translations<'a>(documents: &'a [Document], slug: &str, locale: &str) -> &'a [TranslationRef] {
        documents
            .iter()
            .find(|d| d.slug() == slug && d.locale() == locale)
            .map(|d| d.translations())
            .unwrap()
    }

    #[test]
    fn linking_is_symmetric() {
        let mut documents = vec![post("hello", "en", "Hello"), post("hello", "es", "Hola")];
        link(&mut documents, "en");

        let en = translations(&documents, "hello", "en");
        assert_eq!(en.len(), 1);
        assert_eq!(en[0].locale, "es");
        assert_eq!(en[0].title, "Hola");
        assert_eq!(en[0].url, "/es/post/hello");

        let es = translations(&documents, "hello", "es");
        assert_eq!(es.len(), 1);
        assert_eq!(es[0].locale, "en");
        assert_eq!(es[0].url, "/post/hello");
    }

    #[test]
    fn documents_never_reference_themselves() {
        let mut documents = vec![post("solo", "en", "Solo")];
        link(&mut documents, "en");
        assert!(documents[0].translations().is_empty());
    }

    #[test]
    fn same_locale_not_linked() {
        // Same slug in the same locale is a content mistake, not a translation
        let mut documents = vec![post("dup", "en", "One"), post("dup", "en", "Two")];
        link(&mut documents, "en");
        assert!(documents.iter().all(|d| d.translations().is_empty()));
    }

    #[test]
    fn different_slugs_not_linked() {
        let mut documents = vec![post("first", "en", "First"), post("second", "es", "Segundo")];
        link(&mut documents, "en");
        assert!(documents.iter().all(|d| d.translations().is_empty()));
    }

    #[test]
    fn kind_must_match() {
        // A page and a post can share a slug without being translations
        let mut documents = vec![post("hello", "en", "Hello"), page("hello", "es", "Hola")];
        link(&mut documents, "en");
        assert!(documents.iter().all(|d| d.translations().is_empty()));
    }

    #[test]
    fn three_locales_link_pairwise() {
        let mut documents = vec![
            post("hello", "en", "Hello"),
            post("hello", "es", "Hola"),
            post("hello", "fr", "Bonjour"),
        ];
        link(&mut documents, "en");

        for doc in &documents {
            assert_eq!(doc.translations().len(), 2);
        }

        // Reference order follows document order
        let en = translations(&documents, "hello", "en");
        assert_eq!(en[0].locale, "es");
        assert_eq!(en[1].locale, "fr");
    }

    #[test]
    fn pages_link_without_post_prefix() {
        let mut documents = vec![page("about", "en", "About"), page("about", "es", "Acerca")];
        link(&mut documents, "en");

        let en = translations(&documents, "about", "en");
        assert_eq!(en[0].url, "/es/about");

        let es = translations(&documents, "about", "es");
        assert_eq!(es[0].url, "/about");
    }

    #[test]
    fn relinking_replaces_stale_references() {
        let mut documents = vec![post("hello", "en", "Hello"), post("hello", "es", "Hola")];
        link(&mut documents, "en");
        documents.pop();
        link(&mut documents, "en");
        assert!(documents[0].translations().is_empty());
    }

    #[test]
    fn url_forms() {
        let url = |kind, locale| document_url(kind, "hello", locale, "en");
        assert_eq!(url(DocumentKind::Page, "en"), "/hello");
        assert_eq!(url(DocumentKind::Post, "en"), "/post/hello");
        assert_eq!(url(DocumentKind::Page, "es"), "/es/hello");
        assert_eq!(url(DocumentKind::Post, "es"), "/es/post/hello");
    }
}
