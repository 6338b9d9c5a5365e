//! 설문/질문/선택지 관리 통합 테스트

mod common;

use common::{add_answer, add_question, create_user, seed_survey, setup_state};
use survey_server::domain::answer::dto::{CreateAnswerRequest, UpdateAnswerRequest};
use survey_server::domain::answer::service::AnswerService;
use survey_server::domain::question::dto::{CreateQuestionRequest, UpdateQuestionRequest};
use survey_server::domain::question::service::QuestionService;
use survey_server::domain::survey::dto::{CreateSurveyRequest, UpdateSurveyRequest};
use survey_server::domain::survey::service::SurveyService;
use survey_server::domain::user::dto::UpdateUserRequest;
use survey_server::domain::user::entity::user::Role;
use survey_server::domain::user::service::UserService;
use survey_server::utils::error::AppError;

// ============== 생성 / 조회 ==============

#[tokio::test]
async fn should_walk_survey_question_answer_tree() {
    // Arrange
    let state = setup_state().await;
    let owner = create_user(&state, "owner", Role::User).await;

    // Act
    let fx = seed_survey(&state, owner.clone(), "점심 메뉴").await;

    // Assert
    let by_creator = SurveyService::list_by_creator(&state, owner.user_id)
        .await
        .unwrap();
    assert_eq!(by_creator.len(), 1);
    assert_eq!(by_creator[0].survey_id, fx.survey_id);

    let questions = QuestionService::list_by_survey(&state, fx.survey_id)
        .await
        .unwrap();
    assert_eq!(questions.len(), 2);
    assert!(!questions[0].multiple_answers);
    assert!(questions[1].multiple_answers);

    let answers = AnswerService::list_by_question(&state, fx.single_question_id)
        .await
        .unwrap();
    let ids: Vec<i32> = answers.iter().map(|a| a.answer_id).collect();
    assert_eq!(ids, fx.single_answer_ids.to_vec());
}

#[tokio::test]
async fn should_escape_markup_in_text_fields() {
    // Arrange
    let state = setup_state().await;
    let owner = create_user(&state, "owner", Role::User).await;

    // Act
    let survey = SurveyService::create(
        &state,
        &owner,
        CreateSurveyRequest {
            name: "<b>굵게</b>".to_string(),
            description: Some("\"인용\" & 'x'".to_string()),
        },
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(survey.name, "&lt;b&gt;굵게&lt;/b&gt;");
    assert_eq!(
        survey.description.as_deref(),
        Some("&#34;인용&#34; &amp; &#39;x&#39;")
    );
}

#[tokio::test]
async fn should_return_not_found_for_missing_entities() {
    let state = setup_state().await;

    assert!(matches!(
        SurveyService::get(&state, 1).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        QuestionService::get(&state, 1).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        AnswerService::get(&state, 1).await,
        Err(AppError::NotFound(_))
    ));
    assert!(SurveyService::find(&state.db, 1).await.unwrap().is_none());
}

#[tokio::test]
async fn should_reject_question_for_missing_survey() {
    let state = setup_state().await;
    let owner = create_user(&state, "owner", Role::User).await;

    let result = QuestionService::create(
        &state,
        &owner,
        CreateQuestionRequest {
            text: "고아 질문".to_string(),
            multiple_answers: false,
            survey_id: 404,
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::ReferentialIntegrity(_))));
}

#[tokio::test]
async fn should_reject_answer_for_missing_question() {
    let state = setup_state().await;
    let owner = create_user(&state, "owner", Role::User).await;

    let result = AnswerService::create(
        &state,
        &owner,
        CreateAnswerRequest {
            text: "고아 선택지".to_string(),
            question_id: 404,
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::ReferentialIntegrity(_))));
}

// ============== 소유권 ==============

#[tokio::test]
async fn should_forbid_other_user_from_editing_survey() {
    // Arrange
    let state = setup_state().await;
    let owner = create_user(&state, "owner", Role::User).await;
    let stranger = create_user(&state, "stranger", Role::User).await;
    let fx = seed_survey(&state, owner, "설문").await;

    // Act
    let update = SurveyService::update(
        &state,
        &stranger,
        fx.survey_id,
        UpdateSurveyRequest {
            name: Some("탈취".to_string()),
            description: None,
        },
    )
    .await;
    let delete = SurveyService::delete(&state, &stranger, fx.survey_id).await;
    let add = QuestionService::create(
        &state,
        &stranger,
        CreateQuestionRequest {
            text: "끼어들기".to_string(),
            multiple_answers: false,
            survey_id: fx.survey_id,
        },
    )
    .await;

    // Assert
    assert!(matches!(update, Err(AppError::Forbidden(_))));
    assert!(matches!(delete, Err(AppError::Forbidden(_))));
    assert!(matches!(add, Err(AppError::Forbidden(_))));
    assert!(SurveyService::find(&state.db, fx.survey_id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn should_let_admin_manage_any_survey_content() {
    // Arrange
    let state = setup_state().await;
    let owner = create_user(&state, "owner", Role::User).await;
    let admin = create_user(&state, "boss", Role::Admin).await;
    let fx = seed_survey(&state, owner, "설문").await;

    // Act
    let question = add_question(&state, &admin, fx.survey_id, "관리자 질문", false).await;
    let answer = add_answer(&state, &admin, question, "관리자 선택지").await;
    let updated = AnswerService::update(
        &state,
        &admin,
        answer,
        UpdateAnswerRequest {
            text: Some("수정됨".to_string()),
        },
    )
    .await
    .unwrap();
    let renamed = SurveyService::update(
        &state,
        &admin,
        fx.survey_id,
        UpdateSurveyRequest {
            name: Some("관리자 수정".to_string()),
            description: None,
        },
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(updated.text, "수정됨");
    assert_eq!(renamed.name, "관리자 수정");
    assert_eq!(renamed.description.as_deref(), Some("테스트 설문"));
    QuestionService::delete(&state, &admin, question).await.unwrap();
}

#[tokio::test]
async fn should_update_question_partially() {
    // Arrange
    let state = setup_state().await;
    let owner = create_user(&state, "owner", Role::User).await;
    let fx = seed_survey(&state, owner.clone(), "설문").await;

    // Act
    let updated = QuestionService::update(
        &state,
        &owner,
        fx.single_question_id,
        UpdateQuestionRequest {
            text: None,
            multiple_answers: Some(true),
        },
    )
    .await
    .unwrap();

    // Assert
    assert!(updated.multiple_answers);
    assert_eq!(updated.text, "가장 좋아하는 색은?");
}

// ============== 삭제 ==============

#[tokio::test]
async fn should_report_missing_row_on_delete() {
    let state = setup_state().await;
    let owner = create_user(&state, "owner", Role::User).await;

    let result = SurveyService::delete(&state, &owner, 77).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn should_cascade_question_delete_to_answers() {
    // Arrange
    let state = setup_state().await;
    let owner = create_user(&state, "owner", Role::User).await;
    let fx = seed_survey(&state, owner.clone(), "설문").await;

    // Act
    QuestionService::delete(&state, &owner, fx.single_question_id)
        .await
        .unwrap();

    // Assert
    for answer_id in fx.single_answer_ids {
        assert!(AnswerService::find(&state.db, answer_id)
            .await
            .unwrap()
            .is_none());
    }
    assert!(AnswerService::find(&state.db, fx.multi_answer_ids[0])
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn should_cascade_user_delete_to_created_surveys() {
    // Arrange
    let state = setup_state().await;
    let owner = create_user(&state, "owner", Role::User).await;
    let fx = seed_survey(&state, owner.clone(), "설문").await;

    // Act
    UserService::delete(&state, &owner, owner.user_id)
        .await
        .unwrap();

    // Assert
    assert!(SurveyService::find(&state.db, fx.survey_id)
        .await
        .unwrap()
        .is_none());
    assert!(QuestionService::find(&state.db, fx.single_question_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn should_forbid_deleting_another_user() {
    let state = setup_state().await;
    let victim = create_user(&state, "victim", Role::User).await;
    let stranger = create_user(&state, "stranger", Role::User).await;

    let result = UserService::delete(&state, &stranger, victim.user_id).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn should_update_own_profile_and_detect_conflicts() {
    // Arrange
    let state = setup_state().await;
    let me = create_user(&state, "me", Role::User).await;
    create_user(&state, "taken", Role::User).await;

    // Act
    let conflict = UserService::update(
        &state,
        &me,
        me.user_id,
        UpdateUserRequest {
            nickname: Some("taken".to_string()),
            email: None,
            password: None,
        },
    )
    .await;
    let renamed = UserService::update(
        &state,
        &me,
        me.user_id,
        UpdateUserRequest {
            nickname: Some("me2".to_string()),
            email: None,
            password: None,
        },
    )
    .await
    .unwrap();

    // Assert
    assert!(matches!(conflict, Err(AppError::Conflict(_))));
    assert_eq!(renamed.nickname, "me2");
    assert_eq!(renamed.email, me.email);
}
