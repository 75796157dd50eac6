//! Interactive ask loop: one prompt per configured question. A rejected
//! answer re-asks that single question, never the whole session.

use anyhow::Result;
use moodlog_core::config::AppConfig;
use moodlog_core::entry::EntryDraft;
use moodlog_core::question::{interpret, Answer, Question};
use moodlog_core::store::EntryStore;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::HashMap;

/// Run the ask interaction: prompt, interpret, assemble, append.
///
/// Nothing is written until every answer has been interpreted and the
/// assembled entry has passed record validation.
pub fn ask(config: &AppConfig, questions: &[Question]) -> Result<()> {
    println!("Answer the following questions. Ctrl+C to cancel.\n");

    let mut rl = DefaultEditor::new()?;
    let mut answers: HashMap<String, Answer> = HashMap::new();

    for question in questions {
        loop {
            let prompt_text = format!("\x1b[1;36m{}\x1b[0m ", question.text);
            let line = match rl.readline(&prompt_text) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("Cancelled, nothing saved.");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            match interpret(question, &line) {
                Ok(Some(answer)) => {
                    answers.insert(question.field.clone(), answer);
                    break;
                }
                Ok(None) => {
                    // Blank text counts as unset; required questions get
                    // re-asked rather than silently skipped.
                    if question.required {
                        println!("\x1b[0;31m✗ An answer is required\x1b[0m");
                        continue;
                    }
                    break;
                }
                Err(e) => {
                    println!("\x1b[0;31m✗ {}\x1b[0m", e);
                    continue;
                }
            }
        }
    }

    let entry = EntryDraft::from_answers(&answers).build()?;
    let store = EntryStore::new(config);
    store.append(&entry)?;
    println!("\x1b[0;32m✓ Entry saved.\x1b[0m");

    Ok(())
}
