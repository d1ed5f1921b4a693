//! Fuzzy brand resolver over a registry snapshot.

use leadscore_core::{BrandEntry, BrandRegistry, RulesConfig};

use crate::alias::AliasTable;
use crate::normalize::{contains_token_sequence, normalize_company_name};

/// Resolves free-text company names against one registry snapshot.
///
/// Registry names are normalized once at construction; `resolve` is then a
/// pure, deterministic lookup. Precedence, first hit wins:
///
/// 1. alias table (curated variant → canonical)
/// 2. exact normalized equality
/// 3. token-aligned containment (shorter side ≥ `min_containment_len`)
/// 4. normalized Levenshtein similarity ≥ `fuzzy_threshold`
///
/// No match is a legitimate outcome, not an error.
#[derive(Debug)]
pub struct BrandResolver<'a> {
    registry: &'a BrandRegistry,
    normalized: Vec<String>,
    aliases: AliasTable,
    legal_suffixes: Vec<String>,
    fuzzy_threshold: f64,
    min_containment_len: usize,
}

impl<'a> BrandResolver<'a> {
    #[must_use]
    pub fn new(registry: &'a BrandRegistry, rules: &RulesConfig) -> Self {
        let legal_suffixes = rules.resolver.legal_suffixes.clone();
        let normalized = registry
            .entries()
            .iter()
            .map(|e| normalize_company_name(&e.name, &legal_suffixes))
            .collect();
        Self {
            registry,
            normalized,
            aliases: AliasTable::build(&rules.aliases, &legal_suffixes),
            legal_suffixes,
            fuzzy_threshold: rules.resolver.fuzzy_threshold,
            min_containment_len: rules.resolver.min_containment_len,
        }
    }

    /// Best-matching registry entry for a company name, if any.
    #[must_use]
    pub fn resolve(&self, company_name: &str) -> Option<&'a BrandEntry> {
        let norm = normalize_company_name(company_name, &self.legal_suffixes);
        if norm.is_empty() {
            return None;
        }

        if let Some(entry) = self.resolve_alias(&norm) {
            tracing::debug!(company = company_name, brand = %entry.name, "alias match");
            return Some(entry);
        }

        if let Some(entry) = self.resolve_exact(&norm) {
            tracing::debug!(company = company_name, brand = %entry.name, "exact match");
            return Some(entry);
        }

        if let Some(entry) = self.resolve_containment(&norm) {
            tracing::debug!(company = company_name, brand = %entry.name, "containment match");
            return Some(entry);
        }

        if let Some((entry, score)) = self.resolve_fuzzy(&norm) {
            tracing::debug!(
                company = company_name,
                brand = %entry.name,
                score,
                "fuzzy match"
            );
            return Some(entry);
        }

        tracing::debug!(company = company_name, "no registry match");
        None
    }

    /// Alias candidates are tried most-specific-first; a candidate only
    /// counts if its canonical name actually exists in this registry.
    fn resolve_alias(&self, norm: &str) -> Option<&'a BrandEntry> {
        for canonical in self.aliases.candidates(norm) {
            if let Some(idx) = self.normalized.iter().position(|n| n == canonical) {
                return Some(&self.registry.entries()[idx]);
            }
        }
        None
    }

    fn resolve_exact(&self, norm: &str) -> Option<&'a BrandEntry> {
        let idx = self.normalized.iter().position(|n| n == norm)?;
        Some(&self.registry.entries()[idx])
    }

    /// Containment in either direction, at token boundaries only. The
    /// longest overlap wins; ties go to earliest registry order.
    fn resolve_containment(&self, norm: &str) -> Option<&'a BrandEntry> {
        let mut best: Option<(usize, usize)> = None; // (overlap chars, index)
        for (idx, reg) in self.normalized.iter().enumerate() {
            let (shorter, longer) = if reg.chars().count() < norm.chars().count() {
                (reg.as_str(), norm)
            } else {
                (norm, reg.as_str())
            };
            if shorter.chars().count() < self.min_containment_len {
                continue;
            }
            if contains_token_sequence(longer, shorter) {
                let overlap = shorter.chars().count();
                if best.is_none_or(|(best_overlap, _)| overlap > best_overlap) {
                    best = Some((overlap, idx));
                }
            }
        }
        best.map(|(_, idx)| &self.registry.entries()[idx])
    }

    /// Highest similarity at or above the threshold; ties go to earliest
    /// registry order.
    fn resolve_fuzzy(&self, norm: &str) -> Option<(&'a BrandEntry, f64)> {
        let mut best: Option<(f64, usize)> = None;
        for (idx, reg) in self.normalized.iter().enumerate() {
            if reg.is_empty() {
                continue;
            }
            let score = strsim::normalized_levenshtein(norm, reg);
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, idx));
            }
        }
        match best {
            Some((score, idx)) if score >= self.fuzzy_threshold => {
                Some((&self.registry.entries()[idx], score))
            }
            _ => None,
        }
    }
}
