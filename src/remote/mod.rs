//! Remote sentence search, used as a fallback when the local corpus has no suitable sentence.
//!
//! [RemoteSearch] is the seam between the fill pipeline and the actual service:
//! [TatoebaClient] queries the public Tatoeba API, tests plug in their own implementations.
mod retry;
mod tatoeba;

use std::time::Duration;

use log::{debug, warn};

pub use retry::{Attempt, RetryPolicy, Throttle};
pub use tatoeba::{parse_candidates, TatoebaClient, DEFAULT_ENDPOINT};

use crate::error::Error;
use crate::filtering::QualityFilter;
use crate::index::{select, Selection, TermQuery};
use crate::text::{first_sentence, normalize_ws, strip_outer_quotes};

/// A service returning raw candidate texts for a term.
pub trait RemoteSearch {
    fn search(&self, term: &str) -> Result<Vec<String>, Error>;
}

/// Candidate cleanup: whitespace collapse, outer quotes removal, first sentence only.
pub fn clean_candidate(text: &str) -> String {
    let normalized = normalize_ws(text);
    let unquoted = strip_outer_quotes(&normalized);
    first_sentence(unquoted).into_owned()
}

/// Shortest cleaned candidate that matches the query and passes the filter.
pub fn best_candidate(texts: &[String], query: &TermQuery, filter: &QualityFilter) -> Option<String> {
    let cleaned: Vec<String> = texts.iter().map(|t| clean_candidate(t)).collect();
    select(
        cleaned.iter().map(String::as_str),
        query,
        filter,
        Selection::Shortest,
    )
    .map(str::to_string)
}

/// Throttled remote lookups with candidate selection.
///
/// Any failure (network, status, malformed payload) degrades to "no sentence".
pub struct Fallback<'s> {
    searcher: &'s dyn RemoteSearch,
    filter: QualityFilter,
    throttle: Throttle,
    nb_requests: usize,
}

impl<'s> Fallback<'s> {
    pub fn new(searcher: &'s dyn RemoteSearch, filter: QualityFilter, interval: Duration) -> Self {
        Self {
            searcher,
            filter,
            throttle: Throttle::new(interval),
            nb_requests: 0,
        }
    }

    /// Query the remote service for `query`.
    pub fn find(&mut self, query: &TermQuery) -> Option<String> {
        self.throttle.wait();
        self.nb_requests += 1;

        match self.searcher.search(query.term()) {
            Ok(texts) => {
                debug!("{:?}: {} remote candidates", query.term(), texts.len());
                best_candidate(&texts, query, &self.filter)
            }
            Err(e) => {
                warn!("remote search failed for {:?}: {}", query.term(), e);
                None
            }
        }
    }

    /// Number of remote requests issued so far.
    pub fn nb_requests(&self) -> usize {
        self.nb_requests
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::filtering::QualityConfig;

    struct Canned {
        texts: Vec<String>,
        calls: RefCell<Vec<String>>,
    }

    impl RemoteSearch for Canned {
        fn search(&self, term: &str) -> Result<Vec<String>, Error> {
            self.calls.borrow_mut().push(term.to_string());
            Ok(self.texts.clone())
        }
    }

    struct Broken;

    impl RemoteSearch for Broken {
        fn search(&self, _: &str) -> Result<Vec<String>, Error> {
            Err(Error::Custom("connection refused".to_string()))
        }
    }

    #[test]
    fn cleanup() {
        assert_eq!(
            clean_candidate("  \"The  kettle is boiling.  Make some tea.\" "),
            "The kettle is boiling."
        );
    }

    #[test]
    fn picks_shortest_valid() {
        let texts = vec![
            "I put the kettle on the stove before breakfast this morning.".to_string(),
            "The kettle is boiling in the kitchen.".to_string(),
            "kettle".to_string(),
            "A pot is not a teapot at all, you know.".to_string(),
        ];
        let filter = QualityFilter::default();
        let q = TermQuery::new("kettle").unwrap();
        assert_eq!(
            best_candidate(&texts, &q, &filter),
            Some("The kettle is boiling in the kitchen.".to_string())
        );
    }

    #[test]
    fn fallback_queries_term() {
        let searcher = Canned {
            texts: vec!["\"Xenon is a noble gas that we can find in the air.\"".to_string()],
            calls: RefCell::new(Vec::new()),
        };
        let filter = QualityFilter::new(&QualityConfig::default());
        let mut fallback = Fallback::new(&searcher, filter, Duration::from_millis(0));

        let q = TermQuery::new(" Xenon ").unwrap();
        assert_eq!(
            fallback.find(&q),
            Some("Xenon is a noble gas that we can find in the air.".to_string())
        );
        assert_eq!(searcher.calls.borrow().as_slice(), &["Xenon".to_string()]);
        assert_eq!(fallback.nb_requests(), 1);
    }

    #[test]
    fn failures_are_misses() {
        let mut fallback = Fallback::new(
            &Broken,
            QualityFilter::default(),
            Duration::from_millis(0),
        );
        assert_eq!(fallback.find(&TermQuery::new("xenon").unwrap()), None);
    }
}
