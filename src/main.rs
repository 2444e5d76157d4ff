use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use spendbook::core::log::init_logging;
use spendbook::core::transaction::{Kind, TransactionDraft, TransactionId, TransactionPatch};
use spendbook::core::view::{CategoryFilter, MonthFilter, SortKey, ViewFilter};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for spendbook::AppCommand {
    fn from(cmd: Commands) -> spendbook::AppCommand {
        use spendbook::AppCommand;
        match cmd {
            Commands::Home => AppCommand::Home,
            Commands::List {
                month,
                category,
                sort,
                flat,
            } => AppCommand::List {
                filter: ViewFilter {
                    month,
                    category,
                    sort,
                },
                grouped: !flat,
            },
            Commands::Add {
                description,
                amount,
                category,
                date,
                income,
            } => AppCommand::Add(TransactionDraft {
                description,
                amount,
                category,
                date: date.unwrap_or_default(),
                kind: if income { Kind::Income } else { Kind::Expense },
            }),
            Commands::Edit {
                id,
                description,
                amount,
                category,
                date,
                kind,
            } => {
                let mut patch = TransactionPatch::new(id);
                patch.description = description;
                patch.amount = amount;
                patch.category = category;
                patch.date = date;
                patch.kind = kind;
                AppCommand::Edit(patch)
            }
            Commands::Remove { id, yes } => AppCommand::Remove {
                id: TransactionId::new(id),
                assume_yes: yes,
            },
            Commands::Months => AppCommand::Months,
            Commands::Categories => AppCommand::Categories,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display this month's dashboard
    Home,
    /// List transactions
    List {
        /// Month to show, as YYYY-MM, or `all`
        #[arg(long, default_value = "all")]
        month: MonthFilter,
        /// Category tag to show, or `all`
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// One of date_desc, date_asc, amount_desc, amount_asc
        #[arg(long, default_value = "date_desc")]
        sort: SortKey,
        /// Do not group by month
        #[arg(long)]
        flat: bool,
    },
    /// Record a transaction
    Add {
        description: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category tag, see `spendbook categories`
        #[arg(short, long)]
        category: String,
        /// Date of the transaction, defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Record as income instead of expense
        #[arg(long)]
        income: bool,
    },
    /// Change fields of a transaction
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// expense or income
        #[arg(long)]
        kind: Option<Kind>,
    },
    /// Delete a transaction
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Display totals per month
    Months,
    /// Display the known categories
    Categories,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => spendbook::cli::setup::setup(),
        Some(cmd) => spendbook::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
