use newsquiz::quiz::{Progress, Quiz, QuizError, QuizQuestion, QuizSession};

fn question(prompt: &str, options: &[&str], answer: &str) -> QuizQuestion {
    QuizQuestion {
        question: prompt.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        answer: answer.to_string(),
    }
}

fn two_question_quiz() -> Quiz {
    Quiz {
        questions: vec![
            question("2+2?", &["3", "4"], "4"),
            question("Capital of France?", &["Paris", "Rome"], "Paris"),
        ],
    }
}

#[test]
fn full_run_scores_and_completes() {
    let mut session = QuizSession::start(two_question_quiz());

    assert_eq!(session.current_question_index(), 0);
    assert_eq!(session.score(), 0);
    assert!(!session.is_complete());

    // Correct answer: score and cursor both advance.
    let outcome = session.submit_answer("4").expect("first submission");
    assert!(outcome.correct);
    assert_eq!(outcome.correct_answer, "4");
    assert_eq!(session.score(), 1);
    assert_eq!(session.current_question_index(), 1);

    // Wrong answer: cursor advances, score does not.
    let outcome = session.submit_answer("Rome").expect("second submission");
    assert!(!outcome.correct);
    assert_eq!(outcome.correct_answer, "Paris");
    assert_eq!(session.score(), 1);
    assert_eq!(session.current_question_index(), 2);

    assert!(session.is_complete());
    assert_eq!(session.summary().expect("summary"), (1, 2));
}

#[test]
fn exactly_n_submissions_complete_a_quiz_of_length_n() {
    for n in 1..=6 {
        let quiz = Quiz {
            questions: (0..n)
                .map(|i| question(&format!("q{}", i), &["a", "b"], "a"))
                .collect(),
        };
        let mut session = QuizSession::start(quiz);

        for i in 0..n {
            assert!(!session.is_complete(), "complete too early at {}", i);
            session.submit_answer("a").expect("in-bounds submission");
        }

        assert!(session.is_complete());
        assert_eq!(session.current_question_index(), n);
    }
}

#[test]
fn score_is_monotonically_non_decreasing() {
    let quiz = Quiz {
        questions: (0..4)
            .map(|i| question(&format!("q{}", i), &["yes", "no"], "yes"))
            .collect(),
    };
    let mut session = QuizSession::start(quiz);

    let answers = ["yes", "no", "yes", "no"];
    let mut last_score = 0;
    for answer in answers {
        let outcome = session.submit_answer(answer).expect("submission");
        assert!(session.score() >= last_score);
        let expected_bump = if outcome.correct { 1 } else { 0 };
        assert_eq!(session.score(), last_score + expected_bump);
        last_score = session.score();
    }
    assert_eq!(session.score(), 2);
}

#[test]
fn submission_after_completion_fails_closed() {
    let mut session = QuizSession::start(two_question_quiz());
    session.submit_answer("4").unwrap();
    session.submit_answer("Paris").unwrap();
    assert!(session.is_complete());

    let score_before = session.score();
    let index_before = session.current_question_index();

    let err = session.submit_answer("4").expect_err("must be rejected");
    assert!(matches!(err, QuizError::InvalidState(_)));

    // The failed submission mutated nothing.
    assert_eq!(session.score(), score_before);
    assert_eq!(session.current_question_index(), index_before);
}

#[test]
fn matching_is_exact_and_case_sensitive() {
    let mut session = QuizSession::start(two_question_quiz());
    session.submit_answer("4").unwrap();

    // "paris" != "Paris": counted incorrect.
    let outcome = session.submit_answer("paris").expect("submission");
    assert!(!outcome.correct);
    assert_eq!(session.score(), 1);
}

#[test]
fn whitespace_is_not_trimmed() {
    let mut session = QuizSession::start(two_question_quiz());
    let outcome = session.submit_answer(" 4").expect("submission");
    assert!(!outcome.correct);
}

#[test]
fn empty_answer_counts_as_incorrect() {
    let mut session = QuizSession::start(two_question_quiz());
    let outcome = session.submit_answer("").expect("submission");
    assert!(!outcome.correct);
    assert_eq!(outcome.correct_answer, "4");
    assert_eq!(session.score(), 0);
    assert_eq!(session.current_question_index(), 1);
}

#[test]
fn summary_before_completion_is_invalid() {
    let session = QuizSession::start(two_question_quiz());
    assert!(matches!(
        session.summary(),
        Err(QuizError::InvalidState(_))
    ));
}

#[test]
fn current_question_reflects_the_cursor() {
    let mut session = QuizSession::start(two_question_quiz());

    match session.current_question() {
        Progress::Question {
            question,
            index,
            total,
        } => {
            assert_eq!(question.question, "2+2?");
            assert_eq!(index, 0);
            assert_eq!(total, 2);
        }
        other => panic!("expected first question, got {:?}", other),
    }

    session.submit_answer("4").unwrap();
    session.submit_answer("Paris").unwrap();

    match session.current_question() {
        Progress::Complete { score, total } => {
            assert_eq!(score, 2);
            assert_eq!(total, 2);
        }
        other => panic!("expected completion, got {:?}", other),
    }
}
