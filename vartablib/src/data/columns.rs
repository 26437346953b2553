//! Fixed output columns and field descriptions.
//!
//! A [`ColumnTable`] is the constants table the formatter is built from: the
//! fixed columns in display order plus a description for every field name the
//! table knows about (fixed or Extra). It is an ordinary value, constructed
//! explicitly and handed to the formatter.

use std::collections::{HashMap, HashSet};

/// Description used when a field has none registered.
pub const UNKNOWN_DESCRIPTION: &str = "?";

/// Fixed columns of the default variant effect output, in display order.
pub const VEP_COLUMNS: &[&str] = &[
    "Uploaded_variation",
    "Location",
    "Allele",
    "Gene",
    "Feature",
    "Feature_type",
    "Consequence",
    "cDNA_position",
    "CDS_position",
    "Protein_position",
    "Amino_acids",
    "Codons",
    "Existing_variation",
];

/// Descriptions for fixed columns and known Extra keys.
pub const FIELD_DESCRIPTIONS: &[(&str, &str)] = &[
    ("Uploaded_variation", "Identifier of uploaded variant"),
    ("Location", "Location of variant in standard coordinate format (chr:start or chr:start-end)"),
    ("Allele", "The variant allele used to calculate the consequence"),
    ("Gene", "Stable ID of affected gene"),
    ("Feature", "Stable ID of feature"),
    ("Feature_type", "Type of feature - Transcript, RegulatoryFeature or MotifFeature"),
    ("Consequence", "Consequence type"),
    ("cDNA_position", "Relative position of base pair in cDNA sequence"),
    ("CDS_position", "Relative position of base pair in coding sequence"),
    ("Protein_position", "Relative position of amino acid in protein"),
    ("Amino_acids", "Reference and variant amino acids"),
    ("Codons", "Reference and variant codon sequence"),
    ("Existing_variation", "Identifier(s) of co-located known variants"),
    ("IMPACT", "Subjective impact classification of consequence type"),
    ("DISTANCE", "Shortest distance from variant to transcript"),
    ("STRAND", "Strand of the feature (1/-1)"),
    ("FLAGS", "Transcript quality flags"),
    ("VARIANT_CLASS", "SO variant class"),
    ("MINIMISED", "Alleles in this variant have been converted to minimal representation before consequence calculation"),
    ("ALLELE_NUM", "Allele number from input; 0 is reference, 1 is first alternate etc"),
    ("REF_ALLELE", "Reference allele"),
    ("UPLOADED_ALLELE", "The variant allele uploaded"),
    ("SYMBOL", "Gene symbol (e.g. HGNC)"),
    ("SYMBOL_SOURCE", "Source of gene symbol"),
    ("HGNC_ID", "Stable identifer of HGNC gene symbol"),
    ("BIOTYPE", "Biotype of transcript or regulatory feature"),
    ("CANONICAL", "Indicates if transcript is canonical for this gene"),
    ("MANE_SELECT", "MANE Select (Matched Annotation from NCBI and EMBL-EBI) Transcript"),
    ("MANE_PLUS_CLINICAL", "MANE Plus Clinical (Matched Annotation from NCBI and EMBL-EBI) Transcript"),
    ("TSL", "Transcript support level"),
    ("APPRIS", "Annotates alternatively spliced transcripts as primary or alternate based on a range of computational methods"),
    ("CCDS", "Indicates if transcript is a CCDS transcript"),
    ("ENSP", "Protein identifer"),
    ("SWISSPROT", "UniProtKB/Swiss-Prot accession"),
    ("TREMBL", "UniProtKB/TrEMBL accession"),
    ("UNIPARC", "UniParc accession"),
    ("UNIPROT_ISOFORM", "Direct mappings to UniProtKB isoforms"),
    ("RefSeq", "RefSeq transcript IDs that match the Ensembl transcript"),
    ("SOURCE", "Source of transcript"),
    ("REFSEQ_MATCH", "RefSeq transcript match status"),
    ("REFSEQ_OFFSET", "HGVS adjustment length required due to mismatch between RefSeq transcript and the reference genome"),
    ("GIVEN_REF", "Reference allele from input"),
    ("USED_REF", "Reference allele as used to get consequences"),
    ("BAM_EDIT", "Indicates success or failure of edit using BAM file"),
    ("GENE_PHENO", "Indicates if gene is associated with a phenotype, disease or trait"),
    ("SIFT", "SIFT prediction and/or score"),
    ("PolyPhen", "PolyPhen prediction and/or score"),
    ("EXON", "Exon number(s) / total"),
    ("INTRON", "Intron number(s) / total"),
    ("DOMAINS", "The source and identifer of any overlapping protein domains"),
    ("HGVSc", "HGVS coding sequence name"),
    ("HGVSp", "HGVS protein sequence name"),
    ("HGVS_OFFSET", "Indicates by how many bases the HGVS notations for this variant have been shifted"),
    ("HGVSg", "HGVS genomic sequence name"),
    ("SPDI", "Genomic SPDI notation"),
    ("MOTIF_NAME", "The stable identifier of a transcription factor binding profile (TFBP) aligned at this position"),
    ("MOTIF_POS", "The relative position of the variation in the aligned TFBP"),
    ("HIGH_INF_POS", "A flag indicating if the variant falls in a high information position of the TFBP"),
    ("MOTIF_SCORE_CHANGE", "The difference in motif score of the reference and variant sequences for the TFBP"),
    ("TRANSCRIPTION_FACTORS", "List of transcription factors which bind to the transcription factor binding profile"),
    ("CELL_TYPE", "List of cell types and classifications for regulatory feature"),
    ("IND", "Individual name"),
    ("ZYG", "Zygosity of individual genotype at this locus"),
    ("AF", "Frequency of existing variant in 1000 Genomes combined population"),
    ("AFR_AF", "Frequency of existing variant in 1000 Genomes combined African population"),
    ("AMR_AF", "Frequency of existing variant in 1000 Genomes combined American population"),
    ("EAS_AF", "Frequency of existing variant in 1000 Genomes combined East Asian population"),
    ("EUR_AF", "Frequency of existing variant in 1000 Genomes combined European population"),
    ("SAS_AF", "Frequency of existing variant in 1000 Genomes combined South Asian population"),
    ("gnomADe_AF", "Frequency of existing variant in gnomAD exomes combined population"),
    ("gnomADg_AF", "Frequency of existing variant in gnomAD genomes combined population"),
    ("MAX_AF", "Maximum observed allele frequency in 1000 Genomes, ESP and ExAC/gnomAD"),
    ("MAX_AF_POPS", "Populations in which maximum allele frequency was observed"),
    ("CLIN_SIG", "ClinVar clinical significance of the dbSNP variant"),
    ("SOMATIC", "Somatic status of existing variant"),
    ("PHENO", "Indicates if existing variant(s) is associated with a phenotype, disease or trait; multiple values correspond to multiple variants"),
    ("PUBMED", "Pubmed ID(s) of publications that cite existing variant"),
    ("VAR_SYNONYMS", "Synonyms of co-located variants"),
    ("PICK", "Indicates if this block of consequence data was picked by --flag_pick or --flag_pick_allele"),
];

/// Constants table: fixed columns in display order plus field descriptions.
#[derive(Debug, Clone)]
pub struct ColumnTable {
    columns: Vec<String>,
    fixed: HashSet<String>,
    descriptions: HashMap<String, String>,
}

impl ColumnTable {
    /// Create a table with the given fixed columns and no descriptions.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let fixed = columns.iter().cloned().collect();
        Self {
            columns,
            fixed,
            descriptions: HashMap::new(),
        }
    }

    /// The default variant effect column set with its descriptions.
    pub fn vep() -> Self {
        Self::new(VEP_COLUMNS.iter().copied()).with_descriptions(FIELD_DESCRIPTIONS.iter().copied())
    }

    /// Register (or replace) the description of one field.
    pub fn describe(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.descriptions.insert(name.into(), description.into());
        self
    }

    /// Register many descriptions at once.
    pub fn with_descriptions<I, K, V>(mut self, descriptions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.descriptions.extend(
            descriptions
                .into_iter()
                .map(|(name, description)| (name.into(), description.into())),
        );
        self
    }

    /// Fixed column names in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of fixed columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether `name` is a fixed column.
    pub fn is_fixed(&self, name: &str) -> bool {
        self.fixed.contains(name)
    }

    /// Registered description of `name`, if any.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.descriptions.get(name).map(String::as_str)
    }

    /// Description of `name`, or `?` when none is registered.
    pub fn description_or_unknown(&self, name: &str) -> &str {
        self.description(name).unwrap_or(UNKNOWN_DESCRIPTION)
    }
}

impl Default for ColumnTable {
    fn default() -> Self {
        Self::vep()
    }
}
