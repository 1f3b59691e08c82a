//! Metric names emitted by the engines, in display order per product

// Bond
pub const YIELD_TO_MATURITY: &str = "Yield to maturity (%)";
pub const PURCHASE_PRICE: &str = "Purchase price";
pub const ACQUISITION_COST: &str = "Acquisition cost incl. fee";
pub const FACE_VALUE: &str = "Face value";

// Tiered savings
pub const TOTAL_PRINCIPAL: &str = "Total principal";
pub const PRE_TAX_INTEREST: &str = "Pre-tax interest";
pub const INTEREST_TAX: &str = "Interest income tax";
pub const POST_TAX_PAYOUT: &str = "Post-tax payout";
pub const EFFECTIVE_ANNUAL_YIELD: &str = "Effective annual yield (%)";

// Dividend stock
pub const TOTAL_INVESTMENT: &str = "Total investment incl. fee";
pub const PURCHASE_AMOUNT: &str = "Purchase amount";
pub const PURCHASE_FEE: &str = "Purchase fee";
pub const SALE_AMOUNT: &str = "Sale amount";
pub const SALE_FEE: &str = "Sale fee";
pub const TRANSACTION_TAX: &str = "Securities transaction tax";
pub const PRE_TAX_DIVIDEND: &str = "Pre-tax dividends";
pub const DIVIDEND_TAX: &str = "Dividend income tax";
pub const POST_TAX_DIVIDEND: &str = "Post-tax dividends";
pub const NET_PROFIT: &str = "Net realized profit";
pub const REALIZED_RETURN: &str = "Realized return (%)";

// Product labels
pub const BOND_PRODUCT: &str = "Bond (yield to maturity)";
pub const SAVINGS_PRODUCT: &str = "Tiered-rate installment savings";
pub const DIVIDEND_STOCK_PRODUCT: &str = "Dividend stock round trip";
