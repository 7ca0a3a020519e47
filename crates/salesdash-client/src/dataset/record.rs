use chrono::NaiveDate;

/// Source attributes of one sales transaction, as read from a data row.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleFields {
    pub date: Option<NaiveDate>,
    pub year: i32,
    pub month: String,
    pub country: String,
    pub product_category: String,
    pub sub_category: String,
    pub customer_age: i64,
    pub revenue: f64,
    pub cost: f64,
    pub quantity: i64,
}

/// One sales transaction with its derived fields.
///
/// Fields are read-only after construction so `profit` and `year_month`
/// always agree with the source attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    fields: SaleFields,
    year_month: String,
    profit: f64,
}

impl SalesRecord {
    pub fn new(fields: SaleFields) -> Self {
        let year_month = format!("{}-{}", fields.year, fields.month);
        let profit = fields.revenue - fields.cost;
        Self {
            fields,
            year_month,
            profit,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.fields.date
    }

    pub fn year(&self) -> i32 {
        self.fields.year
    }

    pub fn month(&self) -> &str {
        &self.fields.month
    }

    pub fn country(&self) -> &str {
        &self.fields.country
    }

    pub fn product_category(&self) -> &str {
        &self.fields.product_category
    }

    pub fn sub_category(&self) -> &str {
        &self.fields.sub_category
    }

    pub fn customer_age(&self) -> i64 {
        self.fields.customer_age
    }

    pub fn revenue(&self) -> f64 {
        self.fields.revenue
    }

    pub fn cost(&self) -> f64 {
        self.fields.cost
    }

    pub fn quantity(&self) -> i64 {
        self.fields.quantity
    }

    pub fn year_month(&self) -> &str {
        &self.year_month
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }
}
