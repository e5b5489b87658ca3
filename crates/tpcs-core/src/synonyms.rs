//! Subtype synonym map.
//!
//! Maps lowercase free-text cancer subtypes to the standardized category
//! names used by the reference table. Many-to-one and static; the embedded
//! list is what the extraction prompt shows the model.

use serde::{Deserialize, Serialize};

const EMBEDDED: &[(&str, &str)] = &[
    // Non-Hodgkin lymphoma
    ("burkitt lymphoma", "Non-Hodgkin Lymphoma"),
    ("burkitt's lymphoma", "Non-Hodgkin Lymphoma"),
    ("anaplastic large cell lymphoma", "Non-Hodgkin Lymphoma"),
    ("lymphoblastic lymphoma", "Non-Hodgkin Lymphoma"),
    ("diffuse large b-cell lymphoma", "Non-Hodgkin Lymphoma"),
    ("primary mediastinal b-cell lymphoma", "Non-Hodgkin Lymphoma"),
    ("dlbcl", "Non-Hodgkin Lymphoma"),
    // Ewing sarcoma family and osteosarcoma
    ("ewing sarcoma", "Bone Tumors"),
    ("ewing's sarcoma", "Bone Tumors"),
    ("primitive neuroectodermal tumor", "Bone Tumors"),
    ("pnet", "Bone Tumors"),
    ("askin tumor", "Bone Tumors"),
    ("osteosarcoma", "Bone Tumors"),
    // Renal
    ("nephroblastoma", "Renal Tumors"),
    ("wilms", "Renal Tumors"),
    ("wilm's tumor", "Renal Tumors"),
    ("wilms' tumor", "Renal Tumors"),
    ("clear cell sarcoma", "Renal Tumors"),
    ("rhabdoid tumor (kidney)", "Renal Tumors"),
    // Testicular germ cell
    ("testicular yolk sac tumor", "Testicular Germ Cell Tumor"),
    ("testicular teratoma", "Testicular Germ Cell Tumor"),
    ("testicular dysgerminoma", "Testicular Germ Cell Tumor"),
    ("testicular seminoma", "Testicular Germ Cell Tumor"),
    ("testicular embryonal carcinoma", "Testicular Germ Cell Tumor"),
    ("testicular choriocarcinoma", "Testicular Germ Cell Tumor"),
    ("testicular mixed germ cell tumor", "Testicular Germ Cell Tumor"),
    // Ovarian germ cell
    ("ovarian yolk sac tumor", "Ovarian Germ Cell Tumor"),
    ("ovarian teratoma", "Ovarian Germ Cell Tumor"),
    ("ovarian dysgerminoma", "Ovarian Germ Cell Tumor"),
    ("ovarian seminoma", "Ovarian Germ Cell Tumor"),
    ("ovarian embryonal carcinoma", "Ovarian Germ Cell Tumor"),
    ("ovarian choriocarcinoma", "Ovarian Germ Cell Tumor"),
    ("ovarian mixed germ cell tumor", "Ovarian Germ Cell Tumor"),
    // Acute lymphoblastic leukemia
    ("b-cell all", "Acute Lymphoblastic Leukemia"),
    ("t-cell all", "Acute Lymphoblastic Leukemia"),
    ("b-precursor all", "Acute Lymphoblastic Leukemia"),
    ("b-lymphoblastic leukemia", "Acute Lymphoblastic Leukemia"),
    ("t-lymphoblastic leukemia", "Acute Lymphoblastic Leukemia"),
    ("all", "Acute Lymphoblastic Leukemia"),
    // Non-rhabdomyosarcoma soft tissue sarcoma
    ("synovial sarcoma", "Non-Rhabdomyosarcoma Soft Tissue Sarcoma"),
    ("fibrosarcoma", "Non-Rhabdomyosarcoma Soft Tissue Sarcoma"),
    ("liposarcoma", "Non-Rhabdomyosarcoma Soft Tissue Sarcoma"),
    ("malignant peripheral nerve sheath tumor", "Non-Rhabdomyosarcoma Soft Tissue Sarcoma"),
    ("mpnst", "Non-Rhabdomyosarcoma Soft Tissue Sarcoma"),
    ("desmoplastic small round cell tumor", "Non-Rhabdomyosarcoma Soft Tissue Sarcoma"),
    ("epithelioid sarcoma", "Non-Rhabdomyosarcoma Soft Tissue Sarcoma"),
    ("alveolar soft part sarcoma", "Non-Rhabdomyosarcoma Soft Tissue Sarcoma"),
    // Listed under renal above as well; the later mapping wins.
    ("clear cell sarcoma", "Non-Rhabdomyosarcoma Soft Tissue Sarcoma"),
    ("nrsts", "Non-Rhabdomyosarcoma Soft Tissue Sarcoma"),
    // Rhabdomyosarcoma
    ("embryonal rhabdomyosarcoma", "Rhabdomyosarcoma"),
    ("alveolar rhabdomyosarcoma", "Rhabdomyosarcoma"),
    ("pleomorphic rhabdomyosarcoma", "Rhabdomyosarcoma"),
    ("spindle cell rhabdomyosarcoma", "Rhabdomyosarcoma"),
    // Hodgkin lymphoma
    ("classical hodgkin lymphoma", "Hodgkin Lymphoma"),
    ("nodular sclerosis hodgkin lymphoma", "Hodgkin Lymphoma"),
    ("mixed cellularity hodgkin lymphoma", "Hodgkin Lymphoma"),
    ("lymphocyte-rich hodgkin lymphoma", "Hodgkin Lymphoma"),
    ("lymphocyte-depleted hodgkin lymphoma", "Hodgkin Lymphoma"),
    ("nodular lymphocyte predominant hodgkin lymphoma", "Hodgkin Lymphoma"),
    ("lymphocyte predominant hodgkin lymphoma", "Hodgkin Lymphoma"),
    // Astrocytoma
    ("astrocytoma", "Astrocytoma"),
    ("pilocytic astrocytoma", "Astrocytoma"),
    ("glioma", "Astrocytoma"),
    ("glioblastoma", "Astrocytoma"),
    ("gliosarcoma", "Astrocytoma"),
    ("gliomatosis cerebri", "Astrocytoma"),
    // Medulloblastoma
    ("medulloblastoma", "Medulloblastoma"),
    ("nodular medulloblastoma", "Medulloblastoma"),
    ("diffuse medulloblastoma", "Medulloblastoma"),
    ("anaplastic medulloblastoma", "Medulloblastoma"),
    // Neuroblastoma
    ("neuroblastoma", "Neuroblastoma"),
    ("ganglioneuroblastoma", "Neuroblastoma"),
    ("ganglioneuroma", "Neuroblastoma"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymMap {
    /// `(lowercase subtype, category)`, first-insertion order, unique keys.
    entries: Vec<(String, String)>,
}

impl SynonymMap {
    /// The built-in pediatric subtype map.
    pub fn embedded() -> Self {
        Self::from_pairs(EMBEDDED.iter().copied())
    }

    /// Build a map from `(subtype, category)` pairs.
    ///
    /// Subtypes are lowercased. A repeated subtype keeps its first position
    /// and takes the last category given for it.
    pub fn from_pairs<I, S, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (subtype, category) in pairs {
            let key = normalize(subtype.as_ref());
            let category = category.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = category,
                None => entries.push((key, category)),
            }
        }
        Self { entries }
    }

    /// Category for a subtype, ignoring case and surrounding whitespace.
    pub fn lookup(&self, subtype: &str) -> Option<&str> {
        let key = normalize(subtype);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, category)| category.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Distinct target categories, in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for (_, category) in &self.entries {
            if !seen.contains(&category.as_str()) {
                seen.push(category);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `- 'subtype' maps to 'Category'` lines for prompt interpolation.
    pub fn reference_text(&self) -> String {
        let mut text = String::new();
        for (subtype, category) in &self.entries {
            text.push_str(&format!("- '{subtype}' maps to '{category}'\n"));
        }
        text
    }
}

impl Default for SynonymMap {
    fn default() -> Self {
        Self::embedded()
    }
}

fn normalize(subtype: &str) -> String {
    subtype.trim().to_lowercase()
}
