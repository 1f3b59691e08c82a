//! Command line front end for the yield calculators
//!
//! ```text
//! yield_calc bond --face-value 1000000 --price 950000 --coupon-rate 5 --years 3 --frequency 2 --fee-rate 0.1 --apply-tax
//! yield_calc savings --deposit 100000 --tier 6:3.5 --tier 6:7.0
//! yield_calc dividend --buy 10000 --sell 12000 --shares 100 --dividends 50000 --fee-rate 0.015 --tax-rate 0.23
//! yield_calc eval product.json --format json
//! yield_calc interactive
//! ```
//!
//! All rates on the command line are percentages.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use yield_analyzer::metrics::report::{self, ReportStyle};
use yield_analyzer::{
    Assumptions, Bond, BondTerms, Calculator, DividendStock, DividendStockTerms, InterestRateTier,
    MetricSet, Product, TieredSavingsAccount,
};

#[derive(Parser)]
#[command(name = "yield_calc")]
#[command(version, about = "After-tax, after-fee yields for savings, bonds and dividend stocks")]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// JSON file overriding tax and solver assumptions
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    /// Currency unit printed after amounts in table output
    #[arg(long, default_value = "KRW", global = true)]
    currency: String,

    /// Decimal places printed on amounts in table output
    #[arg(long, default_value_t = 0, global = true)]
    amount_decimals: usize,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn report_style(&self) -> ReportStyle {
        ReportStyle {
            currency_unit: self.currency.clone(),
            amount_decimals: self.amount_decimals,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Yield to maturity of a fixed-coupon bond
    Bond(BondArgs),

    /// Payout and effective yield of a tiered-rate installment savings account
    Savings(SavingsArgs),

    /// Realized return of buying, holding and selling a dividend stock
    Dividend(DividendArgs),

    /// Evaluate a product described in a JSON file
    Eval {
        /// Path to the product JSON (tagged with "product")
        file: PathBuf,
    },

    /// Menu-driven prompts on stdin
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Args)]
struct BondArgs {
    /// Face value
    #[arg(long)]
    face_value: f64,

    /// Purchase price
    #[arg(long)]
    price: f64,

    /// Annual coupon rate in percent
    #[arg(long)]
    coupon_rate: f64,

    /// Years to maturity
    #[arg(long)]
    years: f64,

    /// Coupon payments per year
    #[arg(long, default_value_t = 2)]
    frequency: u32,

    /// Trading fee in percent
    #[arg(long, default_value_t = 0.0)]
    fee_rate: f64,

    /// Withhold interest income tax from coupons
    #[arg(long)]
    apply_tax: bool,
}

#[derive(Args)]
struct SavingsArgs {
    /// Monthly deposit
    #[arg(long)]
    deposit: f64,

    /// Rate tier as MONTHS:ANNUAL_RATE_PCT, in schedule order (repeatable)
    #[arg(long = "tier", value_parser = parse_tier, required = true)]
    tiers: Vec<InterestRateTier>,
}

#[derive(Args)]
struct DividendArgs {
    /// Purchase price per share
    #[arg(long)]
    buy: f64,

    /// Selling price per share
    #[arg(long)]
    sell: f64,

    /// Number of shares
    #[arg(long)]
    shares: u32,

    /// Pre-tax dividends received in total
    #[arg(long, default_value_t = 0.0)]
    dividends: f64,

    /// One-way trading fee in percent
    #[arg(long, default_value_t = 0.015)]
    fee_rate: f64,

    /// Securities transaction tax in percent
    #[arg(long, default_value_t = 0.23)]
    tax_rate: f64,
}

fn parse_tier(s: &str) -> std::result::Result<InterestRateTier, String> {
    let (months, rate) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MONTHS:RATE, got '{}'", s))?;
    let months: u32 = months.trim().parse().map_err(|e| format!("bad months '{}': {}", months, e))?;
    let rate: f64 = rate.trim().parse().map_err(|e| format!("bad rate '{}': {}", rate, e))?;
    InterestRateTier::from_percent(months, rate).map_err(|e| e.to_string())
}

impl BondArgs {
    fn into_product(self) -> Result<Product> {
        let bond = Bond::new(BondTerms {
            face_value: self.face_value,
            purchase_price: self.price,
            coupon_rate: self.coupon_rate / 100.0,
            years_to_maturity: self.years,
            coupon_frequency: self.frequency,
            trading_fee_rate: self.fee_rate / 100.0,
            apply_tax: self.apply_tax,
        })?;
        Ok(bond.into())
    }
}

impl SavingsArgs {
    fn into_product(self) -> Result<Product> {
        Ok(TieredSavingsAccount::new(self.deposit, self.tiers)?.into())
    }
}

impl DividendArgs {
    fn into_product(self) -> Result<Product> {
        let stock = DividendStock::new(DividendStockTerms {
            purchase_price_per_share: self.buy,
            selling_price_per_share: self.sell,
            number_of_shares: self.shares,
            total_dividend_received: self.dividends,
            trading_fee_pct: self.fee_rate,
            transaction_tax_pct: self.tax_rate,
        })?;
        Ok(stock.into())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let assumptions = match &cli.assumptions {
        Some(path) => Assumptions::from_json_file(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::default(),
    };
    let calculator = Calculator::new(assumptions);
    let style = cli.report_style();

    let product = match cli.command {
        Commands::Bond(args) => args.into_product()?,
        Commands::Savings(args) => args.into_product()?,
        Commands::Dividend(args) => args.into_product()?,
        Commands::Eval { file } => load_product(&file)?,
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut session = Session::new(stdin.lock(), io::stdout());
            return session.run(&calculator, &style);
        }
    };

    let metrics = calculator.evaluate(&product);
    emit(&metrics, cli.format, &style, &mut io::stdout())
}

fn load_product(path: &Path) -> Result<Product> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading product file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing product file {}", path.display()))
}

fn emit<W: Write>(metrics: &MetricSet, format: OutputFormat, style: &ReportStyle, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => write!(out, "{}", report::render_table(metrics, style))?,
        OutputFormat::Json => writeln!(out, "{}", report::to_json(metrics)?)?,
        OutputFormat::Csv => report::write_csv(metrics, &mut *out)?,
    }
    Ok(())
}

/// Result of one round of product prompts
enum Entry {
    Ready(Product),
    Rejected(anyhow::Error),
    Cancelled,
    EndOfInput,
}

impl<E: Into<anyhow::Error>, P: Into<Product>> From<std::result::Result<P, E>> for Entry {
    fn from(result: std::result::Result<P, E>) -> Self {
        match result {
            Ok(product) => Entry::Ready(product.into()),
            Err(e) => Entry::Rejected(e.into()),
        }
    }
}

/// Prompt loop over any reader/writer pair
struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn run(&mut self, calculator: &Calculator, style: &ReportStyle) -> Result<()> {
        writeln!(self.output, "Effective yield calculator")?;
        writeln!(self.output, "==========================")?;

        loop {
            writeln!(self.output, "\nChoose a calculator (0 to quit):")?;
            writeln!(self.output, "1. Tiered-rate installment savings")?;
            writeln!(self.output, "2. Bond yield to maturity")?;
            writeln!(self.output, "3. Dividend stock round trip")?;

            let choice: u32 = match self.ask("Choice: ")? {
                Some(choice) => choice,
                None => return Ok(()),
            };

            let entry = match choice {
                0 => {
                    writeln!(self.output, "Bye.")?;
                    return Ok(());
                }
                1 => self.savings()?,
                2 => self.bond()?,
                3 => self.dividend()?,
                _ => {
                    writeln!(self.output, "Unknown choice, try again.")?;
                    continue;
                }
            };

            match entry {
                Entry::Ready(product) => {
                    let metrics = calculator.evaluate(&product);
                    writeln!(self.output)?;
                    write!(self.output, "{}", report::render_table(&metrics, style))?;
                }
                Entry::Rejected(e) => writeln!(self.output, "Invalid input: {}", e)?,
                Entry::Cancelled => {}
                Entry::EndOfInput => return Ok(()),
            }
        }
    }

    /// Read one value, re-prompting until it parses; `None` at end of input
    fn ask<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Could not read '{}', try again.", line.trim())?,
            }
        }
    }

    fn savings(&mut self) -> Result<Entry> {
        writeln!(self.output, "\n--- Tiered-rate installment savings ---")?;
        let Some(deposit) = self.ask::<f64>("Monthly deposit: ")? else { return Ok(Entry::EndOfInput) };

        let mut tiers = Vec::new();
        loop {
            writeln!(self.output, "\n--- Tier {} --- (enter 0 months to finish)", tiers.len() + 1)?;
            let Some(months) = self.ask::<u32>("Months: ")? else { return Ok(Entry::EndOfInput) };
            if months == 0 {
                break;
            }
            let Some(rate) = self.ask::<f64>("Annual rate (%): ")? else { return Ok(Entry::EndOfInput) };
            match InterestRateTier::from_percent(months, rate) {
                Ok(tier) => tiers.push(tier),
                Err(e) => writeln!(self.output, "Tier ignored: {}", e)?,
            }
        }

        if tiers.is_empty() {
            writeln!(self.output, "No tiers entered, back to the menu.")?;
            return Ok(Entry::Cancelled);
        }
        Ok(TieredSavingsAccount::new(deposit, tiers).into())
    }

    fn bond(&mut self) -> Result<Entry> {
        writeln!(self.output, "\n--- Bond yield to maturity ---")?;
        let Some(face_value) = self.ask::<f64>("Face value: ")? else { return Ok(Entry::EndOfInput) };
        let Some(purchase_price) = self.ask::<f64>("Purchase price: ")? else { return Ok(Entry::EndOfInput) };
        let Some(coupon_pct) = self.ask::<f64>("Annual coupon rate (%): ")? else { return Ok(Entry::EndOfInput) };
        let Some(years) = self.ask::<f64>("Years to maturity: ")? else { return Ok(Entry::EndOfInput) };
        let Some(frequency) = self.ask::<u32>("Coupons per year (1, 2, 4): ")? else { return Ok(Entry::EndOfInput) };
        let Some(fee_pct) = self.ask::<f64>("Trading fee (%, 0.1 means 0.1%): ")? else { return Ok(Entry::EndOfInput) };
        let Some(apply_tax) = self.ask::<bool>("Withhold interest tax (true/false): ")? else { return Ok(Entry::EndOfInput) };

        let bond = Bond::new(BondTerms {
            face_value,
            purchase_price,
            coupon_rate: coupon_pct / 100.0,
            years_to_maturity: years,
            coupon_frequency: frequency,
            trading_fee_rate: fee_pct / 100.0,
            apply_tax,
        });
        Ok(bond.into())
    }

    fn dividend(&mut self) -> Result<Entry> {
        writeln!(self.output, "\n--- Dividend stock round trip ---")?;
        let Some(buy) = self.ask::<f64>("Purchase price per share: ")? else { return Ok(Entry::EndOfInput) };
        let Some(sell) = self.ask::<f64>("Selling price per share: ")? else { return Ok(Entry::EndOfInput) };
        let Some(shares) = self.ask::<u32>("Number of shares: ")? else { return Ok(Entry::EndOfInput) };
        let Some(dividends) = self.ask::<f64>("Total pre-tax dividends: ")? else { return Ok(Entry::EndOfInput) };
        let Some(fee_pct) = self.ask::<f64>("Trading fee (%): ")? else { return Ok(Entry::EndOfInput) };
        let Some(tax_pct) = self.ask::<f64>("Securities transaction tax (%): ")? else { return Ok(Entry::EndOfInput) };

        let stock = DividendStock::new(DividendStockTerms {
            purchase_price_per_share: buy,
            selling_price_per_share: sell,
            number_of_shares: shares,
            total_dividend_received: dividends,
            trading_fee_pct: fee_pct,
            transaction_tax_pct: tax_pct,
        });
        Ok(stock.into())
    }
}
