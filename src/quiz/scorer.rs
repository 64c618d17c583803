use crate::quiz::{Answers, Question};

/// Counts answered questions whose chosen option is the correct one.
pub fn score<'a, I>(questions: I, answers: &Answers) -> usize
where
    I: IntoIterator<Item = &'a Question>,
{
    questions
        .into_iter()
        .filter(|q| {
            answers
                .get(&q.id)
                .map(|chosen| q.is_answer_correct(chosen))
                .unwrap_or(false)
        })
        .count()
}

pub fn is_passed(score: usize, threshold: usize) -> bool {
    score >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::test_support::questions;

    #[test]
    fn counts_only_correct_choices() {
        let qs = questions(1..=3);
        let mut answers = Answers::new();
        assert_eq!(score(&qs, &answers), 0);

        answers.insert(1, "1a".to_string());
        assert_eq!(score(&qs, &answers), 1);

        answers.insert(2, "2b".to_string());
        assert_eq!(score(&qs, &answers), 1);

        answers.insert(3, "3a".to_string());
        assert_eq!(score(&qs, &answers), 2);
    }

    #[test]
    fn ignores_answers_for_other_questions() {
        let qs = questions(1..=2);
        let mut answers = Answers::new();
        answers.insert(42, "42a".to_string());
        assert_eq!(score(&qs, &answers), 0);
    }

    #[test]
    fn unscoreable_question_never_counts() {
        let mut qs = questions(1..=2);
        for option in &mut qs[0].options {
            option.is_correct = false;
        }
        let mut answers = Answers::new();
        answers.insert(1, "1a".to_string());
        answers.insert(2, "2a".to_string());
        assert_eq!(score(&qs, &answers), 1);
    }

    #[test]
    fn pass_boundary() {
        assert!(is_passed(16, 16));
        assert!(!is_passed(15, 16));
        assert!(is_passed(0, 0));
    }
}
