// src/grading.rs

use std::collections::HashMap;

/// One row of the answer key for a subject: the question and the index
/// (1-4) of its correct option.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnswerKey {
    pub id: i64,
    pub correct_answer: i16,
}

/// Outcome of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeResult {
    pub score: i32,
    pub total_questions: i32,
}

/// Grades a submission against a subject's answer key.
///
/// `total_questions` is the size of the answer key, not of the submission.
/// A submitted answer counts only if, after trimming, it equals the correct
/// option index rendered as a string; unanswered or out-of-range entries
/// count as incorrect. A subject with no questions grades to (0, 0).
pub fn grade(answer_key: &[AnswerKey], submitted: &HashMap<i64, String>) -> GradeResult {
    let total_questions = answer_key.len() as i32;
    let mut score = 0;

    for key in answer_key {
        let correct = submitted
            .get(&key.id)
            .is_some_and(|answer| answer.trim() == key.correct_answer.to_string());
        if correct {
            score += 1;
        }
    }

    GradeResult {
        score,
        total_questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(pairs: &[(i64, i16)]) -> Vec<AnswerKey> {
        pairs
            .iter()
            .map(|&(id, correct_answer)| AnswerKey { id, correct_answer })
            .collect()
    }

    #[test]
    fn all_correct_scores_full_marks() {
        let answer_key = key(&[(1, 3), (2, 1), (3, 4)]);
        let mut submitted = HashMap::new();
        submitted.insert(1, "3".to_string());
        submitted.insert(2, "1".to_string());
        submitted.insert(3, "4".to_string());

        let result = grade(&answer_key, &submitted);
        assert_eq!(result.score, 3);
        assert_eq!(result.total_questions, 3);
    }

    #[test]
    fn empty_submission_scores_zero_of_n() {
        let answer_key = key(&[(1, 2), (2, 2)]);
        let result = grade(&answer_key, &HashMap::new());
        assert_eq!(result.score, 0);
        assert_eq!(result.total_questions, 2);
    }

    #[test]
    fn wrong_answer_counts_as_incorrect() {
        let answer_key = key(&[(10, 3)]);
        let mut submitted = HashMap::new();
        submitted.insert(10, "2".to_string());

        let result = grade(&answer_key, &submitted);
        assert_eq!(result.score, 0);
        assert_eq!(result.total_questions, 1);
    }

    #[test]
    fn out_of_range_answer_counts_as_incorrect() {
        let answer_key = key(&[(10, 3)]);
        let mut submitted = HashMap::new();
        submitted.insert(10, "7".to_string());

        let result = grade(&answer_key, &submitted);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn garbage_answer_counts_as_incorrect() {
        let answer_key = key(&[(10, 3)]);
        let mut submitted = HashMap::new();
        submitted.insert(10, "three".to_string());

        assert_eq!(grade(&answer_key, &submitted).score, 0);
    }

    #[test]
    fn submitted_answer_is_trimmed_before_comparison() {
        let answer_key = key(&[(10, 3)]);
        let mut submitted = HashMap::new();
        submitted.insert(10, " 3 ".to_string());

        assert_eq!(grade(&answer_key, &submitted).score, 1);
    }

    #[test]
    fn answers_for_unknown_questions_are_ignored() {
        let answer_key = key(&[(1, 1)]);
        let mut submitted = HashMap::new();
        submitted.insert(1, "1".to_string());
        submitted.insert(99, "1".to_string());

        let result = grade(&answer_key, &submitted);
        assert_eq!(result.score, 1);
        assert_eq!(result.total_questions, 1);
    }

    #[test]
    fn zero_question_subject_grades_to_zero_zero() {
        let mut submitted = HashMap::new();
        submitted.insert(1, "1".to_string());

        let result = grade(&[], &submitted);
        assert_eq!(result.score, 0);
        assert_eq!(result.total_questions, 0);
    }

    #[test]
    fn partial_submission_gets_partial_score() {
        let answer_key = key(&[(1, 1), (2, 2), (3, 3)]);
        let mut submitted = HashMap::new();
        submitted.insert(1, "1".to_string());
        submitted.insert(2, "4".to_string());

        let result = grade(&answer_key, &submitted);
        assert_eq!(result.score, 1);
        assert_eq!(result.total_questions, 3);
    }
}
