use anyhow::Result;

use std::io::{BufRead, Write};

use crate::{
    aggregate::{best_selling_product, total_revenue},
    error::Error,
    record::{parse_product, parse_quantity, parse_unit_price, today, Record},
    report::{best_seller_message, revenue_message, SalesTable},
    store::Store,
};

const MAIN_MENU: &str = "MAIN MENU

    1- Display total revenue
    2- Display best-selling product
    3- Add a sold product
    4- View all data
    5- Quit the program

";
const RULE: &str = "-----------------";

/// The interactive sales menu.
///
/// Reads choices from `input` and writes everything it shows to `output`,
/// until the user quits or `input` runs out.
pub struct Menu<'a, R, W> {
    store: &'a Store,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Runs the menu loop.
    ///
    /// Problems with the sales file or with the values entered are shown to
    /// the user and the loop carries on.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "SALES MANAGEMENT")?;
        loop {
            writeln!(self.output)?;
            write!(self.output, "{MAIN_MENU}")?;
            let Some(answer) = self.prompt("Enter your choice: ")? else {
                break;
            };
            let Ok(choice) = answer.trim().parse::<i32>() else {
                writeln!(self.output, "Error: Please enter an integer.")?;
                continue;
            };
            match choice {
                1 => self.show_revenue()?,
                2 => self.show_best_seller()?,
                3 => self.add_sale()?,
                4 => self.show_all()?,
                5 => {
                    if self.quit()? {
                        break;
                    }
                }
                _ => {
                    writeln!(self.output)?;
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                }
            }
        }
        Ok(())
    }

    fn show_revenue(&mut self) -> Result<()> {
        let Some(records) = self.load()? else {
            return Ok(());
        };
        let message = revenue_message(total_revenue(&records));
        self.framed(&message)
    }

    fn show_best_seller(&mut self) -> Result<()> {
        let Some(records) = self.load()? else {
            return Ok(());
        };
        match best_selling_product(&records) {
            Ok(best) => self.framed(&best_seller_message(&best)),
            Err(Error::EmptyInput) => self.framed("No sales recorded yet."),
            Err(err) => Err(err.into()),
        }
    }

    fn show_all(&mut self) -> Result<()> {
        writeln!(self.output)?;
        let Some(records) = self.load()? else {
            return Ok(());
        };
        write!(self.output, "{}", SalesTable(&records))?;
        Ok(())
    }

    fn add_sale(&mut self) -> Result<()> {
        writeln!(self.output)?;
        let question = format!(
            "Do you want to add a product to {}? (Y/N) ",
            self.store.path().display()
        );
        if is_yes(&self.ask(&question)?) {
            writeln!(self.output)?;
            self.enter_sale()?;
        } else {
            writeln!(self.output)?;
            writeln!(self.output, "Thank you for your response!")?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    // Stops at the first invalid value, before asking for the next one.
    fn enter_sale(&mut self) -> Result<()> {
        let product = match parse_product(&self.ask("Enter the product name: ")?) {
            Ok(product) => product,
            Err(err) => return self.say(&err),
        };
        let quantity = match parse_quantity(&self.ask("Enter the quantity sold: ")?) {
            Ok(quantity) => quantity,
            Err(err) => return self.say(&err),
        };
        let unit_price = match parse_unit_price(&self.ask("Enter the unit price: ")?) {
            Ok(price) => price,
            Err(err) => return self.say(&err),
        };
        let record = Record {
            product,
            quantity,
            unit_price,
            sale_date: today(),
        };
        if let Err(err) = self.store.append(&record) {
            return self.say(&format!("Error: {err}"));
        }
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{} added successfully on {}.",
            record.product,
            record.sale_date.format("%Y-%m-%d")
        )?;
        Ok(())
    }

    fn quit(&mut self) -> Result<bool> {
        writeln!(self.output)?;
        let answer = self.ask("Do you want to quit the program? (Y/N) ")?;
        writeln!(self.output)?;
        if !is_yes(&answer) {
            return Ok(false);
        }
        writeln!(self.output, "Thank you for using the program.")?;
        writeln!(self.output)?;
        writeln!(self.output, "Goodbye!")?;
        Ok(true)
    }

    fn load(&mut self) -> Result<Option<Vec<Record>>> {
        match self.store.load() {
            Ok(sales) => {
                if !sales.skipped.is_empty() {
                    writeln!(
                        self.output,
                        "Skipped {} malformed row(s) in {}.",
                        sales.skipped.len(),
                        self.store.path().display()
                    )?;
                }
                Ok(Some(sales.records))
            }
            Err(err) => {
                writeln!(self.output, "Error: {err}")?;
                Ok(None)
            }
        }
    }

    fn framed(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output)?;
        writeln!(self.output, "{message}")?;
        writeln!(self.output)?;
        writeln!(self.output, "{RULE}")?;
        Ok(())
    }

    fn say(&mut self, message: &dyn std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Like [`Menu::prompt`], but end of input reads as an empty answer.
    fn ask(&mut self, question: &str) -> Result<String> {
        Ok(self.prompt(question)?.unwrap_or_default())
    }

    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
