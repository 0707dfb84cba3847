use std::{env, path::PathBuf, process};

use chrono::{Datelike, Local, NaiveDate};
use colored::Colorize;

use cashflow_core::{
    analysis::{three_paycheck_months, twenty_eight_day_impact, BudgetAnalysis, HealthBand},
    config::{ConfigManager, EngineConfig},
    core::services::{BillService, PayoffService, ProjectionService},
    currency::{format_amount, format_date, format_month, CurrencyCode, FormatOptions},
    domain::{BillId, BudgetSnapshot, YearMonth},
    init,
    payoff::{PayoffOutcome, PayoffPlan, PayoffStrategy},
    projection::{DayStatus, MonthProjection},
    schedule::ScheduledStatus,
    storage::{load_snapshot_from_path, InMemoryLedgerStore, JsonLedgerStore, LedgerRepository},
    utils::build_info,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("{} {err}", "Error:".red().bold());
        process::exit(1);
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Project,
    Bills,
    Toggle,
    Payoff,
    Analysis,
}

impl Command {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "project" => Some(Command::Project),
            "bills" => Some(Command::Bills),
            "toggle" => Some(Command::Toggle),
            "payoff" => Some(Command::Payoff),
            "analysis" => Some(Command::Analysis),
            _ => None,
        }
    }
}

struct Args {
    positional: Vec<String>,
    ledger: Option<PathBuf>,
    today: Option<NaiveDate>,
    json: bool,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> CliResult<Self> {
        let mut args = Args {
            positional: Vec::new(),
            ledger: None,
            today: None,
            json: false,
        };
        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--ledger" => {
                    let path = raw.next().ok_or("--ledger needs a path")?;
                    args.ledger = Some(PathBuf::from(path));
                }
                "--today" => {
                    let value = raw.next().ok_or("--today needs a YYYY-MM-DD date")?;
                    args.today = Some(NaiveDate::parse_from_str(&value, "%Y-%m-%d")?);
                }
                "--json" => args.json = true,
                _ => args.positional.push(arg),
            }
        }
        Ok(args)
    }

    fn required(&self, index: usize, what: &str) -> CliResult<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| format!("missing {what}").into())
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// The `--ledger` file when given, otherwise the ledger embedded in the snapshot.
    fn repository(&self, snapshot: &BudgetSnapshot) -> Box<dyn LedgerRepository> {
        match &self.ledger {
            Some(path) => Box::new(JsonLedgerStore::new(path.clone())),
            None => Box::new(InMemoryLedgerStore::with_ledger(
                snapshot.bill_payments.clone(),
            )),
        }
    }
}

struct Formatter {
    code: CurrencyCode,
    options: FormatOptions,
}

impl Formatter {
    fn new(config: &EngineConfig) -> Self {
        Self {
            code: CurrencyCode::new(config.currency.clone()),
            options: FormatOptions::default(),
        }
    }

    fn amount(&self, value: f64) -> String {
        format_amount(value, &self.code, &self.options)
    }
}

fn run() -> CliResult<()> {
    let mut raw = env::args().skip(1);
    let Some(command) = raw.next() else {
        print_usage();
        process::exit(1);
    };
    if command == "version" {
        println!("{}", build_info::current());
        return Ok(());
    }
    let Some(command) = Command::parse(&command) else {
        print_usage();
        process::exit(1);
    };

    let args = Args::parse(raw)?;
    let snapshot_path = PathBuf::from(args.required(0, "snapshot path")?);
    let snapshot = load_snapshot_from_path(&snapshot_path)?;
    let config = ConfigManager::new()?.load()?;
    let fmt = Formatter::new(&config);

    match command {
        Command::Project => {
            let month: YearMonth = args.required(1, "month (YYYY-MM)")?.parse()?;
            let repo = args.repository(&snapshot);
            let projection =
                ProjectionService::month(repo.as_ref(), &snapshot, &config, month, args.today())?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                print_projection(&projection, &fmt);
            }
        }
        Command::Bills => {
            let month: YearMonth = args.required(1, "month (YYYY-MM)")?.parse()?;
            let repo = args.repository(&snapshot);
            let options = config.expansion_options(args.today());
            let bills = BillService::bills_for_month(repo.as_ref(), &snapshot, month, &options)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&bills)?);
                return Ok(());
            }
            println!("{}", format!("Bills for {}", format_month(month)).bold());
            for bill in &bills {
                let status = match bill.status {
                    ScheduledStatus::Paid => "paid".green(),
                    ScheduledStatus::Overdue => "overdue".red(),
                    ScheduledStatus::DueSoon => "due soon".yellow(),
                    ScheduledStatus::Upcoming => "upcoming".normal(),
                };
                println!(
                    "  {}  {:<28} {:>12}  {:<9} {}",
                    format_date(bill.due_date),
                    bill.label,
                    fmt.amount(bill.amount),
                    status,
                    bill.bill_id.as_str().dimmed()
                );
            }
        }
        Command::Toggle => {
            let month: YearMonth = args.required(1, "month (YYYY-MM)")?.parse()?;
            let bill_id = BillId::from_raw(args.required(2, "bill id")?);
            let path = args.ledger.clone().ok_or("toggle needs --ledger <path>")?;
            let repo = JsonLedgerStore::new(path);
            let options = config.expansion_options(args.today());
            let bills = BillService::bills_for_month(&repo, &snapshot, month, &options)?;
            let Some(bill) = bills.iter().find(|bill| bill.bill_id == bill_id) else {
                return Err(format!("no bill `{}` in {}", bill_id, month).into());
            };
            let paid = BillService::toggle_paid(&repo, month, &bill_id, args.today())?;
            let state = if paid { "paid".green() } else { "unpaid".yellow() };
            println!("{} marked {}", bill.label, state);
        }
        Command::Payoff => {
            let mode = args.positional.get(1).map(String::as_str).unwrap_or("compare");
            let extra: f64 = match args.positional.get(2) {
                Some(value) => value.parse()?,
                None => 0.0,
            };
            let plans = match mode {
                "avalanche" => vec![PayoffService::plan(
                    &snapshot,
                    &config,
                    PayoffStrategy::Avalanche,
                    extra,
                )?],
                "snowball" => vec![PayoffService::plan(
                    &snapshot,
                    &config,
                    PayoffStrategy::Snowball,
                    extra,
                )?],
                "compare" => {
                    let (avalanche, snowball) = PayoffService::compare(&snapshot, &config, extra)?;
                    vec![avalanche, snowball]
                }
                other => return Err(format!("unknown payoff strategy `{other}`").into()),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&plans)?);
            } else {
                for plan in &plans {
                    print_plan(plan, &fmt);
                }
            }
        }
        Command::Analysis => {
            let analysis = BudgetAnalysis::for_snapshot(&snapshot);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
                return Ok(());
            }
            print_analysis(&analysis, &snapshot, args.today(), &fmt);
        }
    }

    Ok(())
}

fn print_projection(projection: &MonthProjection, fmt: &Formatter) {
    println!(
        "{}  opening {}  closing {}",
        format_month(projection.month).bold(),
        fmt.amount(projection.opening_balance),
        fmt.amount(projection.closing_balance)
    );
    for day in projection.days.iter().filter(|day| !day.events.is_empty()) {
        let balance = fmt.amount(day.running_balance);
        let balance = match day.status {
            DayStatus::Good => balance.green(),
            DayStatus::Caution => balance.yellow(),
            DayStatus::Critical => balance.red().bold(),
        };
        println!("  {}  {:>14}", format_date(day.date), balance);
        for event in &day.events {
            let sign = if event.is_incoming { "+" } else { "-" };
            let paid = if event.is_paid { " (paid)" } else { "" };
            println!(
                "      {sign}{:>12}  {}{}",
                fmt.amount(event.amount),
                event.label,
                paid.dimmed()
            );
        }
        if day.reserve_recommended {
            println!(
                "      {} keep {} back for bills before the next pay day",
                "reserve:".cyan(),
                fmt.amount(day.reserve_amount)
            );
        }
    }
    let summary = &projection.summary;
    println!(
        "  {} pay days, {} bills ({} unpaid), lowest {}",
        summary.pay_day_count,
        summary.bill_count,
        fmt.amount(summary.unpaid_bill_total),
        fmt.amount(summary.lowest_balance)
    );
}

fn print_plan(plan: &PayoffPlan, fmt: &Formatter) {
    println!(
        "{} (extra {}/month)",
        plan.strategy.label().to_uppercase().bold(),
        fmt.amount(plan.extra_monthly_payment)
    );
    for event in &plan.events {
        println!(
            "  month {:>3}: {} paid off, {} left ({})",
            event.month,
            event.debt_name,
            event.remaining_debts,
            fmt.amount(event.total_remaining_balance)
        );
    }
    match &plan.outcome {
        PayoffOutcome::Completed { months } => println!(
            "  {} in {} months, interest {}",
            "debt free".green(),
            months,
            fmt.amount(plan.total_interest)
        ),
        PayoffOutcome::NonConvergent { month, debt_name } => println!(
            "  {} at month {}: payments do not cover interest on {}",
            "stalled".red(),
            month,
            debt_name
        ),
        PayoffOutcome::CapReached {
            months,
            remaining_balance,
        } => println!(
            "  {} after {} months with {} outstanding",
            "not finished".yellow(),
            months,
            fmt.amount(*remaining_balance)
        ),
    }
}

fn print_analysis(
    analysis: &BudgetAnalysis,
    snapshot: &BudgetSnapshot,
    today: NaiveDate,
    fmt: &Formatter,
) {
    let band = match analysis.health_band {
        HealthBand::Healthy => "healthy".green(),
        HealthBand::Fair => "fair".yellow(),
        HealthBand::AtRisk => "at risk".red(),
    };
    println!("{}", "Monthly budget".bold());
    println!("  income        {:>12}", fmt.amount(analysis.monthly_income));
    println!("  fixed         {:>12}", fmt.amount(analysis.expenses.fixed));
    println!("  variable      {:>12}", fmt.amount(analysis.expenses.variable));
    println!(
        "  discretionary {:>12}",
        fmt.amount(analysis.expenses.discretionary)
    );
    println!(
        "  28-day        {:>12}",
        fmt.amount(analysis.expenses.twenty_eight_day)
    );
    println!("  debt          {:>12}", fmt.amount(analysis.debt_payments));
    println!("  surplus       {:>12}", fmt.amount(analysis.monthly_surplus));
    println!("  health        {:>12}  {}", analysis.health_score, band);

    let extra_pay: Vec<String> = three_paycheck_months(&snapshot.income, today.year())
        .into_iter()
        .map(format_month)
        .collect();
    if !extra_pay.is_empty() {
        println!("  three-pay months: {}", extra_pay.join(", "));
    }
    let high: Vec<String> =
        twenty_eight_day_impact(&snapshot.expenses, YearMonth::from_date(today), 12)
            .into_iter()
            .filter(|month| month.is_high_month)
            .map(|month| format_month(month.month))
            .collect();
    if !high.is_empty() {
        println!("  double 28-day charges: {}", high.join(", "));
    }
}

fn print_usage() {
    eprintln!(
        "Usage: cashflow_core_cli <command> <snapshot.json> [args] [--json] [--today YYYY-MM-DD]\n\
         Commands:\n  \
         project <snapshot.json> <YYYY-MM> [--ledger <file.json>]\n  \
         bills <snapshot.json> <YYYY-MM> [--ledger <file.json>]\n  \
         toggle <snapshot.json> <YYYY-MM> <bill-id> --ledger <file.json>\n  \
         payoff <snapshot.json> [avalanche|snowball|compare] [extra]\n  \
         analysis <snapshot.json>\n  \
         version"
    );
}
