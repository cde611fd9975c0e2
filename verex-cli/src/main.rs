use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use verex_core::{Expression, VerexError};

#[derive(Parser)]
#[command(name = "verex")]
#[command(about = "Verex - build regular expressions from readable verbs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// A builder step, VERB or VERB=ARG; repeat to chain (e.g. -s start -s then=http)
    #[arg(short, long = "step", value_name = "STEP", value_parser = parse_step, global = true)]
    steps: Vec<Step>,

    /// Ignore case when matching
    #[arg(short = 'i', long, global = true)]
    any_case: bool,

    /// Test the whole input instead of only its first line
    #[arg(short, long, global = true)]
    multiline: bool,

    /// Match anywhere instead of requiring a full match
    #[arg(short, long, global = true)]
    global: bool,

    /// Log compile and match details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the assembled pattern and its modifiers
    Show,
    /// Test the expression against input
    Test {
        /// The input string to test
        input: String,
    },
    /// Replace every match in the source
    Replace {
        /// The source string
        source: String,
        /// The replacement text ($1 refers to a capture group)
        replacement: String,
    },
}

/// One verb of the expression, as given on the command line
#[derive(Debug, Clone, PartialEq)]
enum Step {
    StartOfLine,
    EndOfLine,
    Then(String),
    Maybe(String),
    Anything,
    Something,
    AnythingBut(String),
    SomethingBut(String),
    Linebreak,
    Tab,
    Word,
    AnyOf(String),
    Range(Vec<(char, char)>),
    Multiple(String),
    Alt(String),
}

fn parse_step(raw: &str) -> Result<Step, String> {
    let (verb, arg) = match raw.split_once('=') {
        Some((verb, arg)) => (verb, Some(arg.to_string())),
        None => (raw, None),
    };
    let required = |arg: Option<String>| {
        arg.ok_or_else(|| format!("`{verb}` needs an argument, e.g. {verb}=VALUE"))
    };

    let step = match verb {
        "start" => Step::StartOfLine,
        "end" => Step::EndOfLine,
        "then" | "find" => Step::Then(required(arg)?),
        "maybe" => Step::Maybe(required(arg)?),
        "anything" => Step::Anything,
        "something" => Step::Something,
        "anything-but" => Step::AnythingBut(required(arg)?),
        "something-but" => Step::SomethingBut(required(arg)?),
        "linebreak" | "br" => Step::Linebreak,
        "tab" => Step::Tab,
        "word" => Step::Word,
        "any-of" | "any" => Step::AnyOf(required(arg)?),
        "range" => Step::Range(parse_ranges(&required(arg)?)?),
        "multiple" => Step::Multiple(required(arg)?),
        "alt" => Step::Alt(required(arg)?),
        other => return Err(format!("unknown verb `{other}`")),
    };
    Ok(step)
}

/// Parse `a-z,0-9` into character pairs
fn parse_ranges(raw: &str) -> Result<Vec<(char, char)>, String> {
    raw.split(',')
        .map(|pair| {
            let chars: Vec<char> = pair.chars().collect();
            match chars.as_slice() {
                [from, '-', to] => Ok((*from, *to)),
                _ => Err(format!("invalid range `{pair}`, expected FROM-TO")),
            }
        })
        .collect()
}

fn build_expression(cli: &Cli) -> Expression {
    let mut expr = Expression::new();
    for step in &cli.steps {
        match step {
            Step::StartOfLine => expr.start_of_line(),
            Step::EndOfLine => expr.end_of_line(),
            Step::Then(value) => expr.then(value),
            Step::Maybe(value) => expr.maybe(value),
            Step::Anything => expr.anything(),
            Step::Something => expr.something(),
            Step::AnythingBut(value) => expr.anything_but(value),
            Step::SomethingBut(value) => expr.something_but(value),
            Step::Linebreak => expr.linebreak(),
            Step::Tab => expr.tab(),
            Step::Word => expr.word(),
            Step::AnyOf(value) => expr.any_of(value),
            Step::Range(pairs) => expr.range(pairs),
            Step::Multiple(value) => expr.multiple(value),
            Step::Alt(value) => expr.alt(value),
        };
    }

    expr.set_any_case(cli.any_case)
        .set_search_one_line(!cli.multiline)
        .set_search_global(cli.global);
    expr
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let expr = build_expression(&cli);
    match &cli.command {
        Commands::Show => cmd_show(&expr),
        Commands::Test { input } => cmd_test(&expr, input),
        Commands::Replace {
            source,
            replacement,
        } => cmd_replace(&expr, source, replacement),
    }
}

fn fail(err: VerexError) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);
    std::process::exit(2);
}

fn cmd_show(expr: &Expression) {
    println!("{}", "Expression".bold());
    println!("  Pattern:   {}", expr.pattern().cyan());
    let modifiers = expr.modifiers().to_string();
    if modifiers.is_empty() {
        println!("  Modifiers: {}", "(none)".dimmed());
    } else {
        println!("  Modifiers: {}", modifiers.yellow());
    }
}

fn cmd_test(expr: &Expression, input: &str) {
    match expr.test(input) {
        Ok(true) => {
            println!("{}", "true".green());
            std::process::exit(0);
        }
        Ok(false) => {
            println!("{}", "false".red());
            std::process::exit(1);
        }
        Err(e) => fail(e),
    }
}

fn cmd_replace(expr: &Expression, source: &str, replacement: &str) {
    match expr.replace(source, replacement) {
        Ok(result) => println!("{}", result),
        Err(e) => fail(e),
    }
}
