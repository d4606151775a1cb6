use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use edulend_core::lending::returns::{self, LenderReturnInput, LoanReturnInput};

use crate::input;

/// Arguments for borrower-side loan return figures
#[derive(Args)]
pub struct LoanReturnArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Requested principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// APR in percent; omit to use the LearnScore suggestion
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long, default_value_t = 12)]
    pub term: u32,

    /// Borrower's LearnScore, used to pre-fill the rate
    #[arg(long)]
    pub score: Option<u32>,
}

/// Arguments for lender-side funding returns
#[derive(Args)]
pub struct LenderReturnArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount funded
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Loan rate in basis points (700 = 7%)
    #[arg(long)]
    pub rate_bps: Option<i64>,
}

impl LoanReturnArgs {
    fn flag_input(&self) -> Result<LoanReturnInput, Box<dyn std::error::Error>> {
        Ok(LoanReturnInput {
            principal: self
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            interest_rate_percent: self.rate,
            term_months: self.term,
            learn_score: self.score,
        })
    }
}

impl LenderReturnArgs {
    fn flag_input(&self) -> Result<LenderReturnInput, Box<dyn std::error::Error>> {
        Ok(LenderReturnInput {
            amount: self
                .amount
                .ok_or("--amount is required (or provide --input)")?,
            rate_bps: self
                .rate_bps
                .ok_or("--rate-bps is required (or provide --input)")?,
        })
    }
}

pub fn run_loan_return(args: LoanReturnArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanReturnInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        args.flag_input()?
    };

    let result = returns::estimate_loan_return(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_lender_return(args: LenderReturnArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let lender_input: LenderReturnInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        args.flag_input()?
    };

    let result = returns::estimate_lender_return(&lender_input)?;
    Ok(serde_json::to_value(result)?)
}
