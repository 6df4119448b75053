use clap::{Arg, ArgAction, Command as ClapCommand, builder::OsStringValueParser};

pub(crate) const ARG_FILES: &str = "files";
pub(crate) const ARG_UPPER: &str = "upper";
pub(crate) const ARG_PREFIX: &str = "prefix";
pub(crate) const ARG_BLOCK_SIZE: &str = "block-size";
pub(crate) const ARG_PARALLEL: &str = "parallel";
pub(crate) const ARG_BACKEND: &str = "backend";
pub(crate) const ARG_VERBOSE: &str = "verbose";
pub(crate) const ARG_QUIET: &str = "quiet";

pub(crate) fn clap_command(program_name: &'static str) -> ClapCommand {
    ClapCommand::new(program_name)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print MD5 digests of files")
        .after_help("With no FILE, or when FILE is -, read standard input.")
        .arg(
            Arg::new(ARG_FILES)
                .value_name("FILE")
                .num_args(0..)
                .action(ArgAction::Append)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new(ARG_UPPER)
                .short('u')
                .long("upper")
                .action(ArgAction::SetTrue)
                .help("Print digests in upper-case hex"),
        )
        .arg(
            Arg::new(ARG_PREFIX)
                .long("prefix")
                .action(ArgAction::SetTrue)
                .conflicts_with(ARG_BLOCK_SIZE)
                .help("Digest only the first 16 KiB of each input"),
        )
        .arg(
            Arg::new(ARG_BLOCK_SIZE)
                .short('b')
                .long("block-size")
                .value_name("SIZE")
                .value_parser(crate::arguments::parse_block_size_argument)
                .help("Also print a digest for every SIZE-byte slice, zero-padding the last"),
        )
        .arg(
            Arg::new(ARG_PARALLEL)
                .short('j')
                .long("parallel")
                .action(ArgAction::SetTrue)
                .help("Hash operands on a thread pool"),
        )
        .arg(
            Arg::new(ARG_BACKEND)
                .long("backend")
                .value_name("NAME")
                .value_parser(crate::arguments::parse_backend_argument)
                .help("Compression backend: scalar, portable, sse2 or neon"),
        )
        .arg(
            Arg::new(ARG_VERBOSE)
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase diagnostic output (repeatable)"),
        )
        .arg(
            Arg::new(ARG_QUIET)
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with(ARG_VERBOSE)
                .help("Only report errors"),
        )
}
