//! Keyword-driven company categorization.

use leadscore_core::CategoryRules;

/// Assigns every company one category from the fixed taxonomy.
///
/// Rules are evaluated in two passes over the ordered table: company-name
/// keywords first (a known brand name is a stronger signal than a generic
/// industry label), then industry keywords. No hit falls through to the
/// default category, so categorization is total and never fails.
#[derive(Debug)]
pub struct Categorizer<'a> {
    rules: &'a CategoryRules,
}

impl<'a> Categorizer<'a> {
    #[must_use]
    pub fn new(rules: &'a CategoryRules) -> Self {
        Self { rules }
    }

    /// Category for a company name and industry hint. Total function.
    #[must_use]
    pub fn categorize(&self, company_name: &str, industry: &str) -> &'a str {
        let company = company_name.to_lowercase();
        let industry = industry.to_lowercase();

        for rule in &self.rules.rules {
            if keyword_hit(&company, &rule.company_keywords) {
                return &rule.category;
            }
        }

        for rule in &self.rules.rules {
            if keyword_hit(&industry, &rule.industry_keywords) {
                return &rule.category;
            }
        }

        &self.rules.default_category
    }
}

fn keyword_hit(text: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|k| !k.is_empty() && text.contains(k.as_str()))
}
