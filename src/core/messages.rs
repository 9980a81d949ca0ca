//! User-facing text. Everything the session says lives here.

pub const WELCOME: &str = "Welcome to the Web Tech chatbot!";
pub const CHOOSE_TECHNOLOGY: &str = "Select a technology to see its categories:";
pub const LOAD_FAILED: &str = "Sorry, an error occurred while loading the data.";
pub const CHOOSE_ITEM: &str = "Enter the number of an entry to see its detailed definition.";
pub const CATEGORY_HINT: &str =
    "Type 'retour' to choose another category or 'menu' to return to the technology choice.";
pub const SEARCH_HINT: &str = "You can also type a word to search every category of this technology.";
pub const ITEM_HINT: &str =
    "Type 'retour' to go back to the list, another number for another entry, or 'menu' to return to the technology choice.";
pub const MENU_HINT: &str = "Type 'menu' to return to the technology choice.";
pub const INVALID_INPUT: &str = "Please enter a valid number or 'retour'/'menu'.";
pub const NOTHING_TO_SELECT: &str = "There is nothing to choose here. Type 'retour' or 'menu'.";
pub const EMPTY_CATEGORY: &str = "This category has no entries yet.";
pub const NO_CATEGORIES: &str = "This technology has no categories yet.";
pub const EXAMPLE_HEADER: &str = "Example:";
pub const UNNAMED: &str = "(unnamed)";
pub const BACK_LABEL: &str = "retour";

pub fn technology_selected(tech: &str) -> String {
    format!("You selected {tech}. Choose a category to see its list of entries:")
}

pub fn category_listing(tech: &str, category: &str) -> String {
    format!("Here are the entries of category \"{category}\" in {tech}:\n\n")
}

pub fn item_details(title: Option<&str>) -> String {
    match title {
        Some(title) => format!("Details of the selected entry: {title}"),
        None => "Details of the selected entry:".to_string(),
    }
}

pub fn invalid_index(max: usize) -> String {
    format!("Invalid number. Please choose a number between 1 and {max}.")
}

pub fn search_hit(category: &str) -> String {
    format!("Result found in category \"{category}\":")
}

pub fn not_found(term: &str) -> String {
    format!("Sorry, I could not find an entry matching \"{term}\".")
}
