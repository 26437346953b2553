//! Run flags and the Extra fields they enable.
//!
//! Which keys are candidates for the Extra column depends on which optional
//! annotation sources are switched on for a run. [`FLAG_FIELDS`] records that
//! relationship; [`FieldSource`] is the seam the formatter resolves candidates
//! through.

use std::collections::HashSet;

/// Extra fields that every run produces, ahead of any flag-enabled field.
pub const DEFAULT_EXTRA_FIELDS: &[&str] = &["IMPACT", "DISTANCE", "STRAND", "FLAGS"];

/// One run flag and the Extra fields it switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagFields {
    pub flag: &'static str,
    pub fields: &'static [&'static str],
}

const fn flag(flag: &'static str, fields: &'static [&'static str]) -> FlagFields {
    FlagFields { flag, fields }
}

/// Flag-enabled fields, in the order they appear in the Extra column.
pub const FLAG_FIELDS: &[FlagFields] = &[
    flag("variant_class", &["VARIANT_CLASS"]),
    flag("minimal", &["MINIMISED"]),
    flag("individual", &["IND", "ZYG"]),
    flag("allele_number", &["ALLELE_NUM"]),
    flag("show_ref_allele", &["REF_ALLELE"]),
    flag("uploaded_allele", &["UPLOADED_ALLELE"]),
    flag("symbol", &["SYMBOL", "SYMBOL_SOURCE", "HGNC_ID"]),
    flag("biotype", &["BIOTYPE"]),
    flag("canonical", &["CANONICAL"]),
    flag("mane", &["MANE_SELECT", "MANE_PLUS_CLINICAL"]),
    flag("tsl", &["TSL"]),
    flag("appris", &["APPRIS"]),
    flag("ccds", &["CCDS"]),
    flag("protein", &["ENSP"]),
    flag("uniprot", &["SWISSPROT", "TREMBL", "UNIPARC", "UNIPROT_ISOFORM"]),
    flag("xref_refseq", &["RefSeq"]),
    flag("refseq", &["SOURCE", "REFSEQ_MATCH", "REFSEQ_OFFSET", "GIVEN_REF", "USED_REF", "BAM_EDIT"]),
    flag("merged", &["SOURCE", "REFSEQ_MATCH", "REFSEQ_OFFSET", "GIVEN_REF", "USED_REF", "BAM_EDIT"]),
    flag("gene_phenotype", &["GENE_PHENO"]),
    flag("sift", &["SIFT"]),
    flag("polyphen", &["PolyPhen"]),
    flag("numbers", &["EXON", "INTRON"]),
    flag("domains", &["DOMAINS"]),
    flag("hgvs", &["HGVSc", "HGVSp", "HGVS_OFFSET"]),
    flag("hgvsg", &["HGVSg"]),
    flag("spdi", &["SPDI"]),
    flag("regulatory", &["MOTIF_NAME", "MOTIF_POS", "HIGH_INF_POS", "MOTIF_SCORE_CHANGE", "TRANSCRIPTION_FACTORS"]),
    flag("cell_type", &["CELL_TYPE"]),
    flag("af", &["AF"]),
    flag("af_1kg", &["AFR_AF", "AMR_AF", "EAS_AF", "EUR_AF", "SAS_AF"]),
    flag("af_gnomade", &["gnomADe_AF"]),
    flag("af_gnomadg", &["gnomADg_AF"]),
    flag("max_af", &["MAX_AF", "MAX_AF_POPS"]),
    flag("check_existing", &["CLIN_SIG", "SOMATIC", "PHENO"]),
    flag("pubmed", &["PUBMED"]),
    flag("var_synonyms", &["VAR_SYNONYMS"]),
    flag("flag_pick", &["PICK"]),
    flag("flag_pick_allele", &["PICK"]),
];

/// Fields enabled by `flag`, or `None` if the flag enables no fields.
pub fn fields_for_flag(flag: &str) -> Option<&'static [&'static str]> {
    FLAG_FIELDS
        .iter()
        .find(|entry| entry.flag == flag)
        .map(|entry| entry.fields)
}

/// Whether `flag` is listed in [`FLAG_FIELDS`].
pub fn is_known_flag(flag: &str) -> bool {
    fields_for_flag(flag).is_some()
}

/// Resolve the Extra candidates for the flags `enabled` accepts.
///
/// Defaults come first, then each enabled flag's fields in table order.
/// A field enabled by more than one flag keeps its first position.
pub fn resolve_flag_fields(enabled: impl Fn(&str) -> bool) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut fields = Vec::new();

    let flagged = FLAG_FIELDS
        .iter()
        .filter(|entry| enabled(entry.flag))
        .flat_map(|entry| entry.fields.iter());

    for name in DEFAULT_EXTRA_FIELDS.iter().chain(flagged) {
        if seen.insert(*name) {
            fields.push(name.to_string());
        }
    }

    fields
}

/// Source of the Extra column candidates for one run.
///
/// The formatter asks its source once and caches the answer.
pub trait FieldSource {
    fn extra_fields(&self) -> Vec<String>;
}

impl FieldSource for Vec<String> {
    fn extra_fields(&self) -> Vec<String> {
        self.clone()
    }
}

impl FieldSource for Vec<&'static str> {
    fn extra_fields(&self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}
