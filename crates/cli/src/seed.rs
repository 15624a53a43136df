use recall_corpus::Document;

/// Built-in corpora the assistant ships with, one per namespace.
///
/// Small and curated on purpose; a deployment replaces or extends these
/// through `recall build` with its own records.
pub fn corpora() -> Vec<(&'static str, Vec<Document>)> {
    vec![
        ("quotes", quotes()),
        ("journal", journal_prompts()),
        ("wellness", wellness_notes()),
    ]
}

fn quotes() -> Vec<Document> {
    vec![
        Document::new(
            "q1",
            "The only limit to our realization of tomorrow is our doubts of today.",
        )
        .with_meta("author", "Franklin D. Roosevelt"),
        Document::new(
            "q2",
            "In the end, we will remember not the words of our enemies, but the silence of our friends.",
        )
        .with_meta("author", "Martin Luther King Jr."),
        Document::new(
            "q3",
            "Life is what happens when you're busy making other plans.",
        )
        .with_meta("author", "John Lennon"),
        Document::new(
            "q4",
            "Do not go where the path may lead, go instead where there is no path and leave a trail.",
        )
        .with_meta("author", "Ralph Waldo Emerson"),
    ]
}

fn journal_prompts() -> Vec<Document> {
    vec![
        Document::new("j1", "What is one thing that went better today than you expected?")
            .with_meta("type", "reflection"),
        Document::new("j2", "Describe a moment this week when you felt calm. What made it so?")
            .with_meta("type", "reflection"),
        Document::new("j3", "Write about something you are looking forward to and why.")
            .with_meta("type", "anticipation"),
        Document::new("j4", "What would you tell a friend who was facing the worry you have now?")
            .with_meta("type", "perspective"),
    ]
}

fn wellness_notes() -> Vec<Document> {
    vec![
        Document::new("w1", "Slow breathing for a few minutes settles the nervous system.")
            .with_meta("type", "breathing"),
        Document::new("w2", "A short walk outside can reset a difficult afternoon.")
            .with_meta("type", "movement"),
        Document::new("w3", "Keeping a regular sleep time makes the whole week easier.")
            .with_meta("type", "sleep"),
        Document::new("w4", "Noting three good things before bed builds a habit of noticing.")
            .with_meta("type", "gratitude"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_corpus::Corpus;

    #[test]
    fn every_seed_corpus_is_valid() {
        for (namespace, records) in corpora() {
            let corpus = Corpus::from_records(records)
                .unwrap_or_else(|e| panic!("seed corpus '{namespace}' invalid: {e}"));
            assert!(!corpus.is_empty());
        }
    }
}
