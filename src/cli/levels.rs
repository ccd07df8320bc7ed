use crate::prompts;

pub fn handle_levels() {
    println!("{:<6} {:<8} {:<8} GRADES", "CODE", "LEXILE", "AGES");
    for level in prompts::LEVELS {
        println!(
            "{:<6} {:<8} {:<8} {}",
            level.code, level.lexile, level.ages, level.grades
        );
    }
}
