use crate::core::{ListKind, Meal, Meals, Reporter};
use crate::utils::error::MealPlanError;
use std::io::{self, BufRead, Write};

const DIVIDER: &str = "------------------------------------------------------------";

/// Reads commands and prints results over any reader/writer pair.
pub struct UserInterface<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl UserInterface<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> UserInterface<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 讀取一行輸入；輸入結束時回傳 None
    pub fn read_input(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.output, "> ")?;
        self.output.flush()
    }

    pub fn print_line(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    pub fn print_greeting(&mut self) -> io::Result<()> {
        self.print_line(DIVIDER)?;
        self.print_line("Welcome to EZMealPlan!")?;
        self.print_line("Type 'help' to see what you can do.")?;
        self.print_line(DIVIDER)
    }

    pub fn print_farewell(&mut self) -> io::Result<()> {
        self.print_line("Bye! Enjoy your meals.")
    }

    pub fn print_error(&mut self, error: &MealPlanError) -> io::Result<()> {
        writeln!(self.output, "Error: {}", error.user_friendly_message())?;
        writeln!(self.output, "Hint: {}", error.recovery_suggestion())
    }

    pub fn print_meals(&mut self, title: &str, meals: &Meals) -> io::Result<()> {
        self.print_line(title)?;
        if meals.is_empty() {
            return self.print_line("  (no meals)");
        }
        for (position, meal) in meals.iter().enumerate() {
            writeln!(self.output, "  {}. {}", position + 1, meal)?;
        }
        Ok(())
    }

    pub fn print_meal_details(&mut self, meal: &Meal) -> io::Result<()> {
        writeln!(self.output, "{}", meal.name())?;
        if meal.ingredients().is_empty() {
            self.print_line("  (no ingredients)")?;
        }
        for (position, ingredient) in meal.ingredients().iter().enumerate() {
            writeln!(self.output, "  {}. {}", position + 1, ingredient)?;
        }
        writeln!(self.output, "Total price: ${:.2}", meal.price())
    }

    pub fn print_help(&mut self) -> io::Result<()> {
        for line in [
            "Commands:",
            "  recipes                                   list the main catalog",
            "  meals                                     list your selected meals",
            "  create /mname NAME /ing ING (1.00), ...   create a new meal",
            "  select N                                  add catalog meal N to your meals",
            "  remove N                                  remove meal N from your meals",
            "  delete N                                  delete catalog meal N",
            "  view /mlist N | view /ulist N             show a meal's ingredients",
            "  filter /ing TEXT                          find catalog meals by ingredient",
            "  clear                                     empty your meals",
            "  help                                      show this message",
            "  bye                                       exit",
        ] {
            self.print_line(line)?;
        }
        Ok(())
    }
}

/// Reports skipped records on standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn record_skipped(&self, kind: ListKind, record: &str, error: &MealPlanError) {
        eprintln!("{} ({}: {})", error, kind.label(), record);
        eprintln!("The current meal will be skipped.\n");
    }

    fn load_failed(&self, error: &MealPlanError) {
        tracing::info!("Could not load meals: {}", error);
        eprintln!("Could not load meals: {}", error.user_friendly_message());
    }
}
