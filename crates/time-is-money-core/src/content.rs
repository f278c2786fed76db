//! Question content and the built-in category bank.
//!
//! Categories are immutable content data supplied by the host (or taken from
//! [`builtin_categories`]) and validated once at engine construction; the
//! session engine never mutates them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single multiple-choice question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text shown to the player.
    pub prompt: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// Index of the correct option within `options`.
    pub answer: usize,
    /// Maximum currency awarded for an instant correct answer.
    pub value: i64,
    /// Shown after the question has been scored.
    pub explanation: String,
}

impl Question {
    /// Create a question from borrowed content data.
    pub fn new(
        prompt: &str,
        options: &[&str],
        answer: usize,
        value: i64,
        explanation: &str,
    ) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer,
            value,
            explanation: explanation.to_string(),
        }
    }
}

/// A named, ordered sequence of questions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name, also used to select the category.
    pub name: String,
    /// Questions in play order.
    pub questions: Vec<Question>,
}

impl Category {
    /// Create a category.
    pub fn new(name: &str, questions: Vec<Question>) -> Self {
        Self {
            name: name.to_string(),
            questions,
        }
    }

    /// Validate this category's content.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.name.trim().is_empty() {
            return Err(ContentError::EmptyCategoryName);
        }
        if self.questions.is_empty() {
            return Err(ContentError::NoQuestions {
                category: self.name.clone(),
            });
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.prompt.trim().is_empty() {
                return Err(ContentError::EmptyPrompt {
                    category: self.name.clone(),
                    index,
                });
            }
            if question.options.len() < 2 {
                return Err(ContentError::TooFewOptions {
                    category: self.name.clone(),
                    index,
                });
            }
            if question.answer >= question.options.len() {
                return Err(ContentError::AnswerOutOfRange {
                    category: self.name.clone(),
                    index,
                });
            }
            if question.value <= 0 {
                return Err(ContentError::NonPositiveValue {
                    category: self.name.clone(),
                    index,
                });
            }
        }
        Ok(())
    }
}

/// Validate a full category set once at load time.
pub fn validate_categories(categories: &[Category]) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for category in categories {
        category.validate()?;
        if !seen.insert(category.name.as_str()) {
            return Err(ContentError::DuplicateCategory {
                category: category.name.clone(),
            });
        }
    }
    Ok(())
}

/// Errors from invalid question content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentError {
    EmptyCategoryName,
    NoQuestions { category: String },
    DuplicateCategory { category: String },
    EmptyPrompt { category: String, index: usize },
    TooFewOptions { category: String, index: usize },
    AnswerOutOfRange { category: String, index: usize },
    NonPositiveValue { category: String, index: usize },
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::EmptyCategoryName => write!(f, "Category name cannot be empty"),
            ContentError::NoQuestions { category } => {
                write!(f, "Category '{}' has no questions", category)
            }
            ContentError::DuplicateCategory { category } => {
                write!(f, "Category '{}' appears more than once", category)
            }
            ContentError::EmptyPrompt { category, index } => {
                write!(f, "Question {} in '{}' has an empty prompt", index, category)
            }
            ContentError::TooFewOptions { category, index } => {
                write!(
                    f,
                    "Question {} in '{}' needs at least two options",
                    index, category
                )
            }
            ContentError::AnswerOutOfRange { category, index } => {
                write!(
                    f,
                    "Question {} in '{}' has a correct-answer index outside its options",
                    index, category
                )
            }
            ContentError::NonPositiveValue { category, index } => {
                write!(
                    f,
                    "Question {} in '{}' must have a positive base value",
                    index, category
                )
            }
        }
    }
}

impl std::error::Error for ContentError {}

/// The built-in entrepreneurial-finance question bank.
pub fn builtin_categories() -> Vec<Category> {
    vec![
        balance_sheet(),
        cash_flow_management(),
        startup_finance(),
        venture_capital(),
        income_statement(),
    ]
}

fn balance_sheet() -> Category {
    Category::new(
        "Balance Sheet",
        vec![
            Question::new(
                "What is the accounting equation?",
                &[
                    "Assets = Revenue + Expenses",
                    "Assets = Liabilities + Equity",
                    "Liabilities = Assets + Equity",
                    "Equity = Assets * Liabilities",
                ],
                1,
                600,
                "The accounting equation is Assets = Liabilities + Equity. Assets are what \
                 the business owns, funded by liabilities (what it owes) and equity (the \
                 owners' claim on the assets).",
            ),
            Question::new(
                "What are the main sections of a balance sheet?",
                &[
                    "Revenue, Expenses, Profit",
                    "Assets, Liabilities, Equity",
                    "Cash Flow, Income, Expenses",
                    "Investments, Dividends, Retained Earnings",
                ],
                1,
                500,
                "A balance sheet is split into Assets, Liabilities, and Equity, reflecting \
                 the accounting equation.",
            ),
            Question::new(
                "Given total assets of 500.000 and total liabilities of 350.000, what is \
                 owner's equity?",
                &["850.000", "350.000", "150.000", "500.000"],
                2,
                500,
                "Using Assets = Liabilities + Equity, rearrange to Equity = Assets − \
                 Liabilities: 500.000 − 350.000 = 150.000.",
            ),
        ],
    )
}

fn cash_flow_management() -> Category {
    Category::new(
        "Cash Flow Management",
        vec![
            Question::new(
                "What is the primary purpose of a cash flow statement?",
                &[
                    "To determine employee productivity",
                    "To monitor the inflow and outflow of cash",
                    "To track inventory levels",
                    "To calculate net profit",
                ],
                1,
                700,
                "A cash flow statement tracks how cash moves in and out of the business.",
            ),
            Question::new(
                "Which financial metric helps assess a startup’s ability to meet short-term \
                 obligations?",
                &[
                    "Current Ratio",
                    "Debt-to-equity ratio",
                    "Gross margin",
                    "Return on investment (ROI)",
                ],
                0,
                600,
                "The current ratio compares current assets to current liabilities.",
            ),
            Question::new(
                "Operating cash flow differs from free cash flow because free cash flow:",
                &[
                    "Excludes depreciation",
                    "Includes capital expenditures deducted",
                    "Does not account for working capital changes",
                    "Measures revenue only",
                ],
                1,
                600,
                "Free cash flow = Operating cash flow − Capital expenditures, showing cash \
                 available to grow the business or return to investors.",
            ),
        ],
    )
}

fn startup_finance() -> Category {
    Category::new(
        "Startup Finance",
        vec![
            Question::new(
                "Which of the following is a common source of early-stage funding for \
                 startups?",
                &[
                    "Corporate bonds",
                    "Angel investors",
                    "Initial Public Offering (IPO)",
                    "Venture capital",
                ],
                1,
                800,
                "Angel investors often fund very early-stage startups before VCs enter.",
            ),
            Question::new(
                "What is the role of equity financing in a startup?",
                &[
                    "To repay existing loans",
                    "To reduce operating expenses",
                    "To raise capital in exchange for ownership",
                    "To increase product prices",
                ],
                2,
                500,
                "Equity financing gives investors shares in exchange for capital.",
            ),
        ],
    )
}

fn venture_capital() -> Category {
    Category::new(
        "Venture Capital and Equity Dilution",
        vec![
            Question::new(
                "A startup founder owns 100 pct. of 1,000,000 shares. They take a Series A \
                 investment that values the company at $10 million post-money and gives the \
                 investor 20 pct. of the company. How many new shares were issued in this \
                 round?",
                &[
                    "250.000 new shares",
                    "200.000 new shares",
                    "125.000 new shares",
                    "500.000 new shares",
                ],
                0,
                700,
                "0.2 = x / (1,000,000 + x) leads to x = 250,000 new shares, which is 20% \
                 post-money.",
            ),
            Question::new(
                "A founder owns 60 pct. of the company before a funding round. The new \
                 investor purchases 25 pct. of the company in the round. What is the \
                 founder's ownership percentage immediately after this funding round?",
                &["48%", "50%", "35%", "45%"],
                3,
                800,
                "The founder owns 60 pct. of the remaining 75 pct., so 0.6 × 0.75 = 45 pct.",
            ),
            Question::new(
                "A VC firm invests $10 million for 20 pct. of a company with a 2x \
                 Non-Participating Liquidation Preference. If the company is acquired for \
                 $15 million, how much does the investor receive?",
                &["$20 million", "$3 million", "$10 million", "$15 million"],
                3,
                800,
                "The 2x non-participating preference entitles them to up to $20m, but the \
                 exit is only $15m, so they get $15m.",
            ),
        ],
    )
}

fn income_statement() -> Category {
    Category::new(
        "Income Statement",
        vec![
            Question::new(
                "What does the income statement primarily show?",
                &[
                    "A company's cash inflows and outflows",
                    "A company’s financial position at a specific point in time",
                    "A company’s revenue, expenses, and profit over a period",
                    "How much equity owners have invested in the company",
                ],
                2,
                600,
                "The income statement summarizes revenues and expenses over a period, \
                 showing the company’s profit or loss.",
            ),
            Question::new(
                "Gross profit is calculated as:",
                &[
                    "Revenue − Operating Expenses",
                    "Revenue − Cost of Goods Sold",
                    "Net Income − Taxes",
                    "Revenue − Depreciation",
                ],
                1,
                700,
                "Gross profit is revenue minus the direct costs of producing goods (COGS).",
            ),
            Question::new(
                "Which of the following is considered an operating expense?",
                &[
                    "Interest expense",
                    "Cost of raw materials",
                    "Marketing and administrative expenses",
                    "Income tax expense",
                ],
                2,
                700,
                "Operating expenses include marketing, admin, salaries, rent—costs needed \
                 to run daily operations.",
            ),
            Question::new(
                "Net income is best defined as:",
                &[
                    "Revenue minus COGS",
                    "Gross profit minus taxes only",
                    "Revenue minus all expenses including taxes and interest",
                    "Cash received minus cash paid",
                ],
                2,
                800,
                "Net income is revenue minus ALL expenses: COGS, operating expenses, \
                 interest, and taxes.",
            ),
        ],
    )
}
