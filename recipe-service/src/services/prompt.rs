//! Prompt rendering for recipe generation.

/// Section labels the generated recipe must contain, in order.
pub const RECIPE_SECTIONS: [&str; 6] = [
    "Recipe Name",
    "Preparation Time",
    "Servings",
    "Ingredients",
    "Instructions",
    "Serving Suggestions",
];

/// Render the chef prompt for an already validated ingredients string.
///
/// The ingredients are embedded verbatim.
pub fn render_recipe_prompt(ingredients: &str) -> String {
    format!(
        "You are a professional chef. Create a delicious recipe using the following ingredients:\n\
         {ingredients}\n\
         \n\
         Please structure the recipe with these sections:\n\
         - Recipe Name: a short, appetizing name\n\
         - Preparation Time: total time to prepare and cook\n\
         - Servings: how many people the recipe serves\n\
         - Ingredients: every ingredient with its quantity\n\
         - Instructions: numbered, step-by-step cooking instructions\n\
         - Serving Suggestions: how to plate it and what to serve alongside\n"
    )
}
