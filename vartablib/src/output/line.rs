//! Tab-delimited line rendering.
//!
//! [`LineFormatter`] turns one [`AttributeBag`] into one output line: the
//! fixed columns in table order, then a single `Extra` column of
//! `key=value` pairs joined by `;`.
//!
//! ```text
//! rs1<TAB>1:100<TAB>A<TAB>IMPACT=HIGH;SIFT=tolerated,0.5
//! ```
//!
//! Extra keys are ordered by their rank in the run's candidate list, then
//! lexicographically. Keys the run does not list still appear, after all
//! ranked keys. The candidate list and its rank index are resolved on first
//! use and cached for the formatter's lifetime.

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::config::RunConfig;
use crate::data::columns::ColumnTable;
use crate::data::value::{AttributeBag, FieldValue};
use crate::fields::flags::FieldSource;
use crate::fields::headers::{HeaderDescriptor, HeaderProvider};
use crate::fields::order::FieldOrderIndex;
use crate::output::headers::{DescriptionBlock, RunInfo};

/// Rendered in place of a missing value or an empty Extra column.
pub const MISSING_VALUE: &str = "-";

/// Name of the trailing catch-all column.
pub const EXTRA_COLUMN: &str = "Extra";

const COLUMN_SEPARATOR: &str = "\t";
const EXTRA_SEPARATOR: &str = ";";

/// Renders attribute bags and header blocks for one run.
pub struct LineFormatter {
    columns: ColumnTable,
    source: Box<dyn FieldSource + Send + Sync>,
    providers: Vec<Box<dyn HeaderProvider + Send + Sync>>,
    candidates: OnceCell<Vec<String>>,
    order: OnceCell<FieldOrderIndex>,
}

impl LineFormatter {
    /// Create a formatter over `columns`, resolving Extra candidates from `source`.
    pub fn new(columns: ColumnTable, source: impl FieldSource + Send + Sync + 'static) -> Self {
        Self {
            columns,
            source: Box::new(source),
            providers: Vec::new(),
            candidates: OnceCell::new(),
            order: OnceCell::new(),
        }
    }

    /// Create a formatter for a run configuration.
    ///
    /// The configuration supplies the Extra candidates and, through
    /// [`RunConfig::header_providers`], the header providers.
    pub fn from_config(columns: ColumnTable, config: RunConfig) -> Self {
        let providers = config.header_providers();
        let mut formatter = Self::new(columns, config);
        formatter.providers.extend(providers);
        formatter
    }

    /// Append a header provider; providers print in the order added.
    pub fn with_provider(mut self, provider: impl HeaderProvider + Send + Sync + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// The constants table this formatter renders against.
    pub fn columns(&self) -> &ColumnTable {
        &self.columns
    }

    /// Render one bag as a single line, without a trailing newline.
    pub fn render_line(&self, bag: &AttributeBag) -> String {
        let mut cells: Vec<String> = Vec::with_capacity(self.columns.len() + 1);

        for name in self.columns.columns() {
            cells.push(render_value(bag.get(name)));
        }
        cells.push(self.render_extra(bag));

        cells.join(COLUMN_SEPARATOR)
    }

    /// Render every bag, one line each.
    pub fn render_lines<'a, I>(&self, bags: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a AttributeBag>,
    {
        bags.into_iter().map(|bag| self.render_line(bag)).collect()
    }

    fn render_extra(&self, bag: &AttributeBag) -> String {
        let index = self.field_order_index();

        let mut extra: Vec<(&str, &FieldValue)> = bag
            .iter()
            .filter(|(name, _)| !self.columns.is_fixed(name))
            .map(|(name, value)| (name.as_str(), value))
            .collect();

        if extra.is_empty() {
            return MISSING_VALUE.to_string();
        }

        extra.sort_by(|(a, _), (b, _)| index.compare(a, b));
        extra
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(EXTRA_SEPARATOR)
    }

    /// Extra column candidates for this run, resolved once.
    pub fn extra_field_candidates(&self) -> &[String] {
        self.candidates.get_or_init(|| {
            let fields = self.source.extra_fields();
            debug!(count = fields.len(), "Resolved Extra field candidates");
            fields
        })
    }

    /// Rank index over [`extra_field_candidates`](Self::extra_field_candidates), built once.
    pub fn field_order_index(&self) -> &FieldOrderIndex {
        self.order
            .get_or_init(|| FieldOrderIndex::from_candidates(self.extra_field_candidates()))
    }

    /// `#`-prefixed column name line, ending with `Extra`.
    pub fn column_header_line(&self) -> String {
        let mut names: Vec<&str> = self.columns.columns().iter().map(String::as_str).collect();
        names.push(EXTRA_COLUMN);
        format!("#{}", names.join(COLUMN_SEPARATOR))
    }

    /// Described fields for the header block, grouped by section.
    pub fn descriptors(&self) -> DescriptionBlock {
        let describe = |name: &String| {
            HeaderDescriptor::new(name, self.columns.description_or_unknown(name))
        };

        let providers: Vec<HeaderDescriptor> =
            self.providers.iter().flat_map(|p| p.headers()).collect();
        debug!(
            providers = self.providers.len(),
            headers = providers.len(),
            "Collected provider headers"
        );

        DescriptionBlock {
            columns: self.columns.columns().iter().map(describe).collect(),
            extra: self.extra_field_candidates().iter().map(describe).collect(),
            providers,
        }
    }

    /// `##` description lines: fixed columns, Extra candidates, then provider fields.
    pub fn description_headers(&self) -> Vec<String> {
        self.descriptors().lines()
    }

    /// `##` provenance lines that open the header block.
    pub fn run_info_headers(&self, info: &RunInfo) -> Vec<String> {
        info.lines()
    }

    /// Complete header block in print order.
    pub fn header_block(&self, info: &RunInfo) -> Vec<String> {
        let mut lines = self.run_info_headers(info);
        lines.extend(self.description_headers());
        lines.push(self.column_header_line());
        lines
    }
}

fn render_value(value: Option<&FieldValue>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), FieldValue::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::headers::{CustomTrack, PluginHeaders};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn three_columns() -> ColumnTable {
        ColumnTable::new(["Uploaded_variation", "Location", "Allele"])
            .describe("Uploaded_variation", "Identifier of uploaded variant")
            .describe("Location", "Location of variant")
            .describe("IMPACT", "Impact")
    }

    fn formatter() -> LineFormatter {
        LineFormatter::new(three_columns(), vec!["IMPACT", "SIFT"])
    }

    fn sample_bag() -> AttributeBag {
        AttributeBag::new()
            .with("Uploaded_variation", "rs1")
            .with("Location", "1:100")
            .with("Allele", "A")
            .with("IMPACT", "HIGH")
            .with("SIFT", vec!["tolerated", "0.5"])
    }

    /// Counts how often the formatter asks for candidates.
    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl FieldSource for CountingSource {
        fn extra_fields(&self) -> Vec<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            vec!["A".to_string(), "M".to_string()]
        }
    }

    #[test]
    fn test_end_to_end_line() {
        assert_eq!(
            formatter().render_line(&sample_bag()),
            "rs1\t1:100\tA\tIMPACT=HIGH;SIFT=tolerated,0.5"
        );
    }

    #[test]
    fn test_missing_fixed_column() {
        let mut bag = sample_bag();
        bag.remove("Allele");
        assert_eq!(
            formatter().render_line(&bag),
            "rs1\t1:100\t-\tIMPACT=HIGH;SIFT=tolerated,0.5"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let f = formatter();
        let bag = sample_bag().with("ZZZ", "1").with("AAA", "2");
        assert_eq!(f.render_line(&bag), f.render_line(&bag));
    }

    #[test]
    fn test_column_count() {
        let f = formatter();
        for bag in [AttributeBag::new(), sample_bag(), sample_bag().with("X", "y")] {
            assert_eq!(f.render_line(&bag).split('\t').count(), 4);
        }
    }

    #[test]
    fn test_empty_bag() {
        assert_eq!(formatter().render_line(&AttributeBag::new()), "-\t-\t-\t-");
    }

    #[test]
    fn test_only_fixed_columns_gives_empty_extra() {
        let bag = AttributeBag::new()
            .with("Uploaded_variation", "rs1")
            .with("Location", "1:100")
            .with("Allele", "A");
        assert_eq!(formatter().render_line(&bag), "rs1\t1:100\tA\t-");
    }

    #[test]
    fn test_extra_ordering_ranked_then_lexicographic() {
        let f = LineFormatter::new(three_columns(), vec!["A", "M"]);
        let bag = AttributeBag::new()
            .with("X", "x")
            .with("A", "a")
            .with("M", "m");
        assert!(f.render_line(&bag).ends_with("\tA=a;M=m;X=x"));
    }

    #[test]
    fn test_unranked_keys_sorted_lexicographically() {
        let f = LineFormatter::new(three_columns(), Vec::<String>::new());
        let bag = AttributeBag::new()
            .with("b", "1")
            .with("B", "2")
            .with("a", "3");
        assert!(f.render_line(&bag).ends_with("\tB=2;a=3;b=1"));
    }

    #[test]
    fn test_sequence_values() {
        let bag = AttributeBag::new()
            .with("Uploaded_variation", vec!["a", "b", "c"])
            .with("Foo", FieldValue::Sequence(vec!["1".into(), "2".into()]));
        assert_eq!(formatter().render_line(&bag), "a,b,c\t-\t-\tFoo=1,2");
    }

    #[test]
    fn test_fixed_columns_never_in_extra() {
        let f = LineFormatter::new(three_columns(), vec!["Allele", "IMPACT"]);
        let bag = AttributeBag::new().with("Allele", "T").with("IMPACT", "LOW");
        assert_eq!(f.render_line(&bag), "-\t-\tT\tIMPACT=LOW");
    }

    #[test]
    fn test_render_lines() {
        let bags = vec![sample_bag(), AttributeBag::new()];
        let lines = formatter().render_lines(&bags);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "-\t-\t-\t-");
    }

    #[test]
    fn test_candidates_are_memoized() {
        let calls = Arc::new(AtomicUsize::new(0));
        let f = LineFormatter::new(
            three_columns(),
            CountingSource {
                calls: Arc::clone(&calls),
            },
        );

        assert_eq!(f.extra_field_candidates(), &["A", "M"]);
        f.field_order_index();
        f.render_line(&AttributeBag::new().with("M", "1"));
        f.description_headers();
        assert_eq!(f.extra_field_candidates(), &["A", "M"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_field_order_index() {
        let f = formatter();
        assert_eq!(f.field_order_index().rank("IMPACT"), Some(0));
        assert_eq!(f.field_order_index().rank("SIFT"), Some(1));
        assert_eq!(f.field_order_index().rank("Allele"), None);
    }

    #[test]
    fn test_shared_across_threads_resolves_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let f = Arc::new(LineFormatter::new(
            three_columns(),
            CountingSource {
                calls: Arc::clone(&calls),
            },
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let f = Arc::clone(&f);
                std::thread::spawn(move || {
                    f.render_line(&AttributeBag::new().with("X", "1").with("A", "2"))
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "-\t-\t-\tA=2;X=1");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_column_header_line() {
        let f = formatter();
        let header = f.column_header_line();
        assert_eq!(header, "#Uploaded_variation\tLocation\tAllele\tExtra");
        f.render_line(&sample_bag());
        assert_eq!(f.column_header_line(), header);
    }

    #[test]
    fn test_description_headers() {
        let f = formatter()
            .with_provider(PluginHeaders::new("CADD").header("CADD_PHRED", "PHRED score"))
            .with_provider(CustomTrack::new("ClinVar", "clinvar.vcf.gz"));

        assert_eq!(
            f.description_headers(),
            vec![
                "## Column descriptions:",
                "## Uploaded_variation : Identifier of uploaded variant",
                "## Location : Location of variant",
                "## Allele : ?",
                "## Extra column keys:",
                "## IMPACT : Impact",
                "## SIFT : ?",
                "## CADD_PHRED : PHRED score",
                "## ClinVar : clinvar.vcf.gz (overlap)",
            ]
        );
    }

    #[test]
    fn test_from_config_providers_plugins_first() {
        let config = RunConfig::new()
            .flag("sift")
            .custom(CustomTrack::new("Cons", "phylop.bw"))
            .plugin(PluginHeaders::new("LoF").header("LoF", "Loss of function"));
        let f = LineFormatter::from_config(ColumnTable::vep(), config);

        let block = f.descriptors();
        assert_eq!(block.columns.len(), 13);
        assert_eq!(block.extra.last().unwrap().name, "SIFT");
        assert_eq!(block.providers[0].name, "LoF");
        assert_eq!(block.providers[1].name, "Cons");
    }

    #[test]
    fn test_provider_fields_sort_after_candidates() {
        let config = RunConfig::new()
            .flag("symbol")
            .plugin(PluginHeaders::new("CADD").header("CADD_PHRED", "score"));
        let f = LineFormatter::from_config(ColumnTable::vep(), config);
        let bag = AttributeBag::new()
            .with("CADD_PHRED", "23.1")
            .with("SYMBOL", "BRCA2")
            .with("IMPACT", "MODERATE");
        assert!(f
            .render_line(&bag)
            .ends_with("\tIMPACT=MODERATE;SYMBOL=BRCA2;CADD_PHRED=23.1"));
    }

    #[test]
    fn test_header_block_order() {
        let f = formatter();
        let info = RunInfo::new("VARTAB v0.3.0").produced_at("2026-10-16 10:00:00");
        let block = f.header_block(&info);

        assert_eq!(block[0], "## VARTAB v0.3.0");
        assert_eq!(block[1], "## Output produced at 2026-10-16 10:00:00");
        assert_eq!(block[2], "## Column descriptions:");
        assert_eq!(block.last().unwrap(), &f.column_header_line());
        assert_eq!(block.len(), 2 + f.description_headers().len() + 1);
    }
}
