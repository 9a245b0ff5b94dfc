use crate::parser::UsageError;

/// Where help and error text is written, one line at a time.
pub trait UserInterface {
    /// Print one line.
    fn print(&self, message: String);

    /// Print an error, its usage example (if any), and a closing blank line.
    fn print_error(&self, error: &UsageError) {
        self.print(error.to_string());

        if let Some(example) = error.example() {
            self.print(format!("  Example: {example}"));
        }

        self.print("".to_string());
    }
}

/// Writes every line to standard output.
#[derive(Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }
}


#[cfg(test)]
mod tests {
    use super::util::InMemoryInterface;
    use super::*;

    #[test]
    fn print_error_with_example() {
        // Setup
        let interface = InMemoryInterface::default();
        let error = UsageError::MissingRequired {
            name: "service".to_string(),
            example: "prog service halt <service>".to_string(),
        };

        // Execute
        interface.print_error(&error);

        // Verify
        assert_eq!(
            interface.lines(),
            vec![
                "Error: Argument 'service': Required Argument not set!",
                "  Example: prog service halt <service>",
                "",
            ]
        );
    }

    #[test]
    fn print_error_without_example() {
        // Setup
        let interface = InMemoryInterface::default();

        // Execute
        interface.print_error(&UsageError::MissingCommand);

        // Verify
        assert_eq!(
            interface.message(),
            "Error: Please specify Command!\n"
        );
    }
}
