use crate::error::TallyError;
use crate::extraction::{RawTable, TableExtractor};

/// Tries `primary`, then `secondary` when the primary errors or finds no tables.
pub struct FallbackExtractor {
    primary: Box<dyn TableExtractor>,
    secondary: Box<dyn TableExtractor>,
    name: String,
}

impl FallbackExtractor {
    pub fn new(primary: Box<dyn TableExtractor>, secondary: Box<dyn TableExtractor>) -> Self {
        let name = format!(
            "auto ({}, {})",
            primary.backend_name(),
            secondary.backend_name()
        );
        FallbackExtractor {
            primary,
            secondary,
            name,
        }
    }
}

impl TableExtractor for FallbackExtractor {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<Vec<RawTable>, TallyError> {
        let primary_failure = match self.primary.extract(pdf_bytes) {
            Ok(tables) if !tables.is_empty() => {
                tracing::info!(
                    backend = self.primary.backend_name(),
                    tables = tables.len(),
                    "tables extracted"
                );
                return Ok(tables);
            }
            Ok(_) => "no tables found".to_string(),
            Err(e) => e.to_string(),
        };

        tracing::warn!(
            backend = self.primary.backend_name(),
            reason = %primary_failure,
            "falling back to {}",
            self.secondary.backend_name()
        );

        match self.secondary.extract(pdf_bytes) {
            Ok(tables) if !tables.is_empty() => {
                tracing::info!(
                    backend = self.secondary.backend_name(),
                    tables = tables.len(),
                    "tables extracted"
                );
                Ok(tables)
            }
            Ok(_) => Err(TallyError::ExtractionFailed {
                primary: primary_failure,
                fallback: "no tables found".to_string(),
            }),
            Err(e) => Err(TallyError::ExtractionFailed {
                primary: primary_failure,
                fallback: e.to_string(),
            }),
        }
    }

    fn backend_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    enum Behavior {
        Tables(usize),
        Fail,
    }

    struct StubExtractor {
        name: &'static str,
        behavior: Behavior,
        calls: Rc<Cell<usize>>,
    }

    impl TableExtractor for StubExtractor {
        fn extract(&self, _pdf_bytes: &[u8]) -> Result<Vec<RawTable>, TallyError> {
            self.calls.set(self.calls.get() + 1);
            match self.behavior {
                Behavior::Tables(n) => Ok((1..=n)
                    .map(|page_number| RawTable {
                        page_number,
                        ..Default::default()
                    })
                    .collect()),
                Behavior::Fail => Err(TallyError::PdftotextNotFound),
            }
        }

        fn backend_name(&self) -> &str {
            self.name
        }
    }

    fn stub(name: &'static str, behavior: Behavior) -> (Box<dyn TableExtractor>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let extractor = StubExtractor {
            name,
            behavior,
            calls: Rc::clone(&calls),
        };
        (Box::new(extractor), calls)
    }

    #[test]
    fn test_primary_success_skips_secondary() {
        let (primary, _) = stub("a", Behavior::Tables(2));
        let (secondary, secondary_calls) = stub("b", Behavior::Tables(1));
        let tables = FallbackExtractor::new(primary, secondary).extract(&[]).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(secondary_calls.get(), 0);
    }

    #[test]
    fn test_primary_error_uses_secondary() {
        let (primary, _) = stub("a", Behavior::Fail);
        let (secondary, secondary_calls) = stub("b", Behavior::Tables(3));
        let tables = FallbackExtractor::new(primary, secondary).extract(&[]).unwrap();
        assert_eq!(tables.len(), 3);
        assert_eq!(secondary_calls.get(), 1);
    }

    #[test]
    fn test_primary_empty_uses_secondary() {
        let (primary, primary_calls) = stub("a", Behavior::Tables(0));
        let (secondary, _) = stub("b", Behavior::Tables(1));
        let tables = FallbackExtractor::new(primary, secondary).extract(&[]).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(primary_calls.get(), 1);
    }

    #[test]
    fn test_both_fail() {
        let (primary, primary_calls) = stub("a", Behavior::Fail);
        let (secondary, _) = stub("b", Behavior::Tables(0));
        let err = FallbackExtractor::new(primary, secondary)
            .extract(&[])
            .unwrap_err();
        match err {
            TallyError::ExtractionFailed { primary, fallback } => {
                assert!(primary.contains("pdftotext not found"));
                assert_eq!(fallback, "no tables found");
            }
            other => panic!("unexpected error: {other}"),
        }
        // no retries
        assert_eq!(primary_calls.get(), 1);
    }

    #[test]
    fn test_name_lists_both_backends() {
        let (primary, _) = stub("a", Behavior::Fail);
        let (secondary, _) = stub("b", Behavior::Fail);
        assert_eq!(FallbackExtractor::new(primary, secondary).backend_name(), "auto (a, b)");
    }
}
