use clap::Parser;

/// Ranks candidate business locations with the Analytic Network Process.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the analysis: input source, criteria aliases
    /// and the judgments of the criteria network. Every field is optional.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the outcome of an analysis in JSON format. If provided,
    /// anprank will check that the computed output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written in JSON
    /// format to the given location. Setting this option overrides the path that may be specified with
    /// the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The table of candidate locations: one row per location, the name of the location
    /// in the first column. Setting this option overrides the path of the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or excel) The type of the input. By default, it is deduced from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (single character) The separator of a CSV input. By default, ';' is tried first, then ','.
    #[clap(long, value_parser)]
    pub delimiter: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. By default, the first
    /// worksheet.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// If passed as an argument, the output also contains the projected yearly revenue of every
    /// location, read from its sales column.
    #[clap(long, takes_value = false)]
    pub revenue: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
