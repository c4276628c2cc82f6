use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::KeywordList;
use crate::models::Listing;

/// Which listing field(s) a rule is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldScope {
    Title,
    Description,
    /// Title or description
    Any,
}

impl FieldScope {
    pub fn key(&self) -> &'static str {
        match self {
            FieldScope::Title => "title",
            FieldScope::Description => "description",
            FieldScope::Any => "any",
        }
    }

    pub fn all() -> [FieldScope; 3] {
        [FieldScope::Title, FieldScope::Description, FieldScope::Any]
    }
}

impl fmt::Display for FieldScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for FieldScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(FieldScope::Title),
            "description" | "descr" => Ok(FieldScope::Description),
            "any" | "both" => Ok(FieldScope::Any),
            other => Err(format!("unknown field scope '{}' (expected title, description or any)", other)),
        }
    }
}

/// One required/excluded keyword pair applied to a field scope.
///
/// A listing passes when its scoped text contains at least one required
/// pattern (or the required list is empty) and none of the excluded ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub scope: FieldScope,
    #[serde(default)]
    pub required: KeywordList,
    #[serde(default)]
    pub excluded: KeywordList,
}

impl KeywordRule {
    pub fn new(scope: FieldScope, required: KeywordList, excluded: KeywordList) -> Self {
        Self {
            scope,
            required,
            excluded,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.required.is_empty() && self.excluded.is_empty()
    }

    fn passes(&self, listing: &Listing, keep_missing_descriptions: bool) -> bool {
        let title = listing.title.as_str();
        let description = listing.description.as_deref();

        let required_ok = self.required.is_empty()
            || match self.scope {
                FieldScope::Title => self.required.matches(title),
                FieldScope::Description => match description {
                    Some(text) => self.required.matches(text),
                    None => keep_missing_descriptions,
                },
                FieldScope::Any => {
                    self.required.matches(title)
                        || description.is_some_and(|text| self.required.matches(text))
                }
            };

        required_ok && !self.excluded_hit(title, description)
    }

    /// Verdict using the title alone; parts needing a description count as satisfied
    fn prefilter(&self, listing: &Listing) -> bool {
        let title = listing.title.as_str();
        match self.scope {
            FieldScope::Title => {
                (self.required.is_empty() || self.required.matches(title)) && !self.excluded.matches(title)
            }
            FieldScope::Any => !self.excluded.matches(title),
            FieldScope::Description => true,
        }
    }

    fn excluded_hit(&self, title: &str, description: Option<&str>) -> bool {
        if self.excluded.is_empty() {
            return false;
        }
        match self.scope {
            FieldScope::Title => self.excluded.matches(title),
            FieldScope::Description => description.is_some_and(|text| self.excluded.matches(text)),
            FieldScope::Any => {
                self.excluded.matches(title) || description.is_some_and(|text| self.excluded.matches(text))
            }
        }
    }
}

/// The filter predicate: a listing passes iff every rule passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRules {
    #[serde(default)]
    pub rules: Vec<KeywordRule>,
    #[serde(default = "default_keep_missing")]
    pub keep_missing_descriptions: bool,
}

fn default_keep_missing() -> bool {
    true
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            keep_missing_descriptions: true,
        }
    }
}

impl FilterRules {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    /// A single rule, the plain required/excluded form
    pub fn single(scope: FieldScope, required: KeywordList, excluded: KeywordList) -> Self {
        Self::new(vec![KeywordRule::new(scope, required, excluded)])
    }

    /// True when no rule would reject anything
    pub fn is_empty(&self) -> bool {
        self.rules.iter().all(KeywordRule::is_noop)
    }

    pub fn needs_descriptions(&self) -> bool {
        self.rules
            .iter()
            .any(|rule| !rule.is_noop() && rule.scope != FieldScope::Title)
    }

    pub fn passes(&self, listing: &Listing) -> bool {
        self.rules
            .iter()
            .all(|rule| rule.passes(listing, self.keep_missing_descriptions))
    }

    /// Title-only verdict used before descriptions are fetched.
    ///
    /// Never accepts less than [`FilterRules::passes`]: a listing rejected
    /// here is rejected by the full predicate too.
    pub fn prefilter(&self, listing: &Listing) -> bool {
        self.rules.iter().all(|rule| rule.prefilter(listing))
    }

    /// Required patterns of all rules that look at descriptions, for marking
    pub fn description_keywords(&self) -> KeywordList {
        KeywordList::new(
            self.rules
                .iter()
                .filter(|rule| rule.scope != FieldScope::Title)
                .flat_map(|rule| rule.required.iter().map(str::to_string).collect::<Vec<_>>()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listing(title: &str, description: Option<&str>) -> Listing {
        let listing = Listing {
            title: title.to_string(),
            url: format!("https://example.com/jobs/view/{}", title.to_lowercase().replace(' ', "-")),
            ..Default::default()
        };
        match description {
            Some(text) => listing.with_description(text.to_string(), format!("<p>{}</p>", text)),
            None => listing,
        }
    }

    fn rules(scope: FieldScope, required: &str, excluded: &str) -> FilterRules {
        FilterRules::single(scope, KeywordList::parse(required), KeywordList::parse(excluded))
    }

    #[test]
    fn title_without_required_keyword_is_rejected() {
        let r = rules(FieldScope::Title, "python", "");
        assert!(!r.passes(&listing("Dishwasher Employee", None)));
    }

    #[test]
    fn title_with_required_and_no_excluded_is_accepted() {
        let r = rules(FieldScope::Title, "python", "dishwasher");
        assert!(r.passes(&listing("Senior Python Engineer", None)));
    }

    #[test]
    fn excluded_phrase_in_description_rejects_despite_title_match() {
        let r = rules(FieldScope::Any, "python", "filling team");
        let job = listing("Python Developer", Some("Join us as a Filling team employee"));
        assert!(!r.passes(&job));
    }

    #[test]
    fn description_scoped_exclusion_rejects_matching_description() {
        let r = rules(FieldScope::Description, "", "filling team");
        assert!(!r.passes(&listing("Production Worker", Some("Filling team employee"))));
        assert!(r.passes(&listing("Production Worker", Some("Packaging line"))));
        // The title is outside the rule's scope
        assert!(r.passes(&listing("Filling team lead", Some("Packaging line"))));
    }

    #[test]
    fn excluded_wins_over_required_in_same_field() {
        let r = rules(FieldScope::Title, "python", "java");
        assert!(!r.passes(&listing("Python / Java Developer", None)));
    }

    #[test]
    fn empty_required_list_is_always_satisfied() {
        for scope in FieldScope::all() {
            let r = rules(scope, "", "dishwasher");
            assert!(r.passes(&listing("Anything at all", Some("whatever"))), "scope {}", scope);
            assert!(r.passes(&listing("Anything at all", None)), "scope {}", scope);
        }
    }

    #[test]
    fn empty_rule_set_accepts_everything() {
        let r = FilterRules::default();
        assert!(r.is_empty());
        assert!(r.passes(&listing("Dishwasher Employee", None)));
        assert!(r.prefilter(&listing("Dishwasher Employee", None)));
    }

    #[test]
    fn verdict_is_case_insensitive_and_deterministic() {
        let r = rules(FieldScope::Title, "PyThOn", "");
        let job = listing("senior PYTHON engineer", None);
        let first = r.passes(&job);
        for _ in 0..10 {
            assert_eq!(r.passes(&job), first);
        }
        assert!(first);
    }

    #[test]
    fn description_scope_ignores_title() {
        let r = rules(FieldScope::Description, "python", "");
        assert!(!r.passes(&listing("Python Developer", Some("We write Go"))));
        assert!(r.passes(&listing("Backend Developer", Some("Django and Python"))));
    }

    #[test]
    fn missing_description_is_kept_when_configured() {
        let mut r = rules(FieldScope::Description, "python", "");
        let job = listing("Backend Developer", None);
        assert!(r.passes(&job));

        r.keep_missing_descriptions = false;
        assert!(!r.passes(&job));
    }

    #[test]
    fn any_scope_uses_title_when_description_missing() {
        let r = rules(FieldScope::Any, "python", "");
        assert!(r.passes(&listing("Python Developer", None)));
        assert!(!r.passes(&listing("Backend Developer", None)));
    }

    #[test]
    fn all_rules_must_pass() {
        let r = FilterRules::new(vec![
            KeywordRule::new(FieldScope::Title, KeywordList::parse("developer"), KeywordList::parse("java")),
            KeywordRule::new(FieldScope::Description, KeywordList::parse("python"), KeywordList::default()),
        ]);
        assert!(r.passes(&listing("Backend Developer", Some("python and sql"))));
        assert!(!r.passes(&listing("Backend Developer", Some("go and sql"))));
        assert!(!r.passes(&listing("Java Developer", Some("python and sql"))));
    }

    #[test]
    fn prefilter_rejection_implies_full_rejection() {
        let r = FilterRules::new(vec![
            KeywordRule::new(FieldScope::Title, KeywordList::parse("developer"), KeywordList::parse("java")),
            KeywordRule::new(FieldScope::Any, KeywordList::parse("python"), KeywordList::parse("internship")),
            KeywordRule::new(FieldScope::Description, KeywordList::parse("django"), KeywordList::parse("php")),
        ]);
        let titles = ["Python Developer", "Java Developer", "Developer Internship", "Chef", "Developer"];
        let descriptions = [None, Some("django python"), Some("php"), Some("nothing relevant")];

        for title in titles {
            for description in descriptions {
                let job = listing(title, description);
                if !r.prefilter(&job) {
                    assert!(!r.passes(&job), "{} / {:?}", title, description);
                }
            }
        }
    }

    #[test]
    fn prefilter_defers_description_rules() {
        let r = rules(FieldScope::Description, "python", "php");
        assert!(r.prefilter(&listing("Chef", None)));
        assert!(r.needs_descriptions());
        assert!(!rules(FieldScope::Title, "python", "").needs_descriptions());
    }

    #[test]
    fn description_keywords_skip_title_rules() {
        let r = FilterRules::new(vec![
            KeywordRule::new(FieldScope::Title, KeywordList::parse("developer"), KeywordList::default()),
            KeywordRule::new(FieldScope::Description, KeywordList::parse("python, django"), KeywordList::default()),
        ]);
        assert_eq!(r.description_keywords(), KeywordList::parse("python, django"));
    }

    #[test]
    fn scope_parses_from_text() {
        assert_eq!("Title".parse::<FieldScope>(), Ok(FieldScope::Title));
        assert_eq!("both".parse::<FieldScope>(), Ok(FieldScope::Any));
        assert!("body".parse::<FieldScope>().is_err());
    }
}
