use std::fmt;

use serde::{Deserialize, Serialize};

use layered_clause::ClassifiedClause;

/// The kind of agreement a clause most likely belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentType {
    Nda,
    Employment,
    Lease,
    License,
    Loan,
    Partnership,
    Service,
    SaleOfGoods,
    #[default]
    General,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Nda => "Non-Disclosure Agreement",
            DocumentType::Employment => "Employment Agreement",
            DocumentType::Lease => "Lease Agreement",
            DocumentType::License => "License Agreement",
            DocumentType::Loan => "Loan Agreement",
            DocumentType::Partnership => "Partnership Agreement",
            DocumentType::Service => "Service Agreement",
            DocumentType::SaleOfGoods => "Sale of Goods Agreement",
            DocumentType::General => "Contract/Agreement",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A keyword signature: every group must contribute at least one hit.
#[derive(Debug, Clone)]
struct Signature {
    document_type: DocumentType,
    groups: Vec<Vec<&'static str>>,
}

impl Signature {
    /// Total keyword hits, or `None` when some group is absent.
    fn hits(&self, clause: &ClassifiedClause) -> Option<usize> {
        let mut total = 0;
        for group in &self.groups {
            match clause.count_phrases(group) {
                0 => return None,
                n => total += n,
            }
        }
        Some(total)
    }
}

/// Classifies a clause by keyword signatures.
///
/// The signature with the most keyword hits wins. Ties go to the signature
/// declared first, so more specific agreement types are listed before
/// generic ones. No matching signature yields [`DocumentType::General`].
#[derive(Debug, Clone)]
pub struct DocumentTypeClassifier {
    signatures: Vec<Signature>,
}

impl Default for DocumentTypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTypeClassifier {
    pub fn new() -> Self {
        let signature = |document_type, groups: &[&[&'static str]]| Signature {
            document_type,
            groups: groups.iter().map(|g| g.to_vec()).collect(),
        };

        Self {
            signatures: vec![
                signature(
                    DocumentType::Nda,
                    &[
                        &["confidential", "confidentiality", "non-disclosure", "nondisclosure"],
                        &["disclosing party", "receiving party", "disclose", "discloses", "disclosure", "recipient"],
                    ],
                ),
                signature(
                    DocumentType::Employment,
                    &[
                        &["employee", "employer", "employment"],
                        &["salary", "wages", "duties", "position", "benefits", "compensation"],
                    ],
                ),
                signature(
                    DocumentType::Lease,
                    &[
                        &["lease", "leases", "leased", "landlord", "lessor"],
                        &["premises", "tenant", "lessee", "rent"],
                    ],
                ),
                signature(
                    DocumentType::License,
                    &[
                        &["license", "licence", "licensed", "licenses"],
                        &["licensor", "licensee", "software", "intellectual property", "royalty", "royalties"],
                    ],
                ),
                signature(
                    DocumentType::Loan,
                    &[
                        &["loan", "principal", "borrower"],
                        &["lender", "interest", "repay", "repayment"],
                    ],
                ),
                signature(
                    DocumentType::Partnership,
                    &[
                        &["partnership", "partner", "partners"],
                        &["profits", "losses", "capital", "contribution", "contributions"],
                    ],
                ),
                signature(
                    DocumentType::Service,
                    &[
                        &["services", "service"],
                        &["provider", "contractor", "client", "customer", "deliverables", "statement of work"],
                    ],
                ),
                signature(
                    DocumentType::SaleOfGoods,
                    &[
                        &["goods", "products", "merchandise"],
                        &["buyer", "seller", "purchase", "purchaser", "sale", "delivery"],
                    ],
                ),
            ],
        }
    }

    pub fn classify(&self, clause: &ClassifiedClause) -> DocumentType {
        let mut best: Option<(usize, DocumentType)> = None;
        for signature in &self.signatures {
            let Some(hits) = signature.hits(clause) else {
                continue;
            };
            // Strictly greater keeps the earlier signature on ties.
            if best.map_or(true, |(top, _)| hits > top) {
                best = Some((hits, signature.document_type));
            }
        }
        best.map_or(DocumentType::General, |(_, document_type)| document_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> DocumentType {
        DocumentTypeClassifier::new().classify(&ClassifiedClause::from_text(text))
    }

    #[test]
    fn nda() {
        assert_eq!(
            classify("The Receiving Party shall keep all Confidential Information received from the Disclosing Party secret."),
            DocumentType::Nda
        );
    }

    #[test]
    fn lease() {
        assert_eq!(
            classify("The Tenant shall pay rent for the premises under this Lease."),
            DocumentType::Lease
        );
    }

    #[test]
    fn one_group_is_not_enough() {
        // "premises" without any lease vocabulary
        assert_eq!(classify("Keep the premises clean."), DocumentType::General);
    }

    #[test]
    fn most_hits_wins() {
        // Employment: employee, salary, benefits (3); Service: services, client (2)
        assert_eq!(
            classify("The Employee shall provide services to the Client for a salary and benefits."),
            DocumentType::Employment
        );
    }

    #[test]
    fn ties_follow_priority() {
        // License: license, software (2); Sale of Goods: products, buyer (2)
        assert_eq!(
            classify("The Buyer receives a license to the software bundled with the products."),
            DocumentType::License
        );
    }

    #[test]
    fn default_label() {
        let document_type = classify("maybe something");
        assert_eq!(document_type, DocumentType::General);
        assert_eq!(document_type.to_string(), "Contract/Agreement");
    }
}
