use std::sync::Arc;

use serde_json::json;
use services::{
    HttpMoviesLoader, LoadError, MovieQuestionFactory, MoviesApiConfig, MoviesLoading,
    QuestionSource,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "k_test";
const POSTER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

fn factory_for(server: &MockServer) -> MovieQuestionFactory {
    let config = MoviesApiConfig::new(server.uri(), API_KEY);
    MovieQuestionFactory::new(Arc::new(HttpMoviesLoader::new(config)))
}

async fn mount_movies(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/Top250Movies/{API_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn builds_question_from_top_movies() {
    let server = MockServer::start().await;
    mount_movies(
        &server,
        json!({
            "errorMessage": "",
            "items": [{
                "fullTitle": "The Godfather (1972)",
                "imDbRating": "9.2",
                "image": format!("{}/posters/godfather._V1_Ratio0.6716_AL_.jpg", server.uri()),
            }]
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/posters/godfather._V0_UX600_.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(POSTER))
        .expect(1)
        .mount(&server)
        .await;

    let factory = factory_for(&server);
    factory.load_all().await.unwrap();
    assert_eq!(factory.movie_count(), 1);

    let question = factory.request_next().await.unwrap().expect("question");
    assert_eq!(question.image(), POSTER);
    assert_eq!(question.text(), "Is this movie rated higher than 7?");
    assert!(question.correct_answer());
}

#[tokio::test]
async fn low_rating_expects_no() {
    let server = MockServer::start().await;
    mount_movies(
        &server,
        json!({
            "items": [{
                "fullTitle": "Some Film (2001)",
                "imDbRating": "6.4",
                "image": format!("{}/posters/film.jpg", server.uri()),
            }]
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/posters/film.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(POSTER))
        .mount(&server)
        .await;

    let factory = factory_for(&server);
    factory.load_all().await.unwrap();

    let question = factory.request_next().await.unwrap().expect("question");
    assert!(!question.correct_answer());
}

#[tokio::test]
async fn api_error_message_fails_load() {
    let server = MockServer::start().await;
    mount_movies(
        &server,
        json!({ "errorMessage": "Invalid API Key", "items": [] }),
    )
    .await;

    let err = factory_for(&server).load_all().await.unwrap_err();
    assert!(matches!(err, LoadError::Api(ref msg) if msg == "Invalid API Key"));
}

#[tokio::test]
async fn empty_list_fails_load() {
    let server = MockServer::start().await;
    mount_movies(&server, json!({ "errorMessage": "", "items": [] })).await;

    let err = factory_for(&server).load_all().await.unwrap_err();
    assert!(matches!(err, LoadError::Empty));
}

#[tokio::test]
async fn server_error_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/Top250Movies/{API_KEY}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let loader = HttpMoviesLoader::new(MoviesApiConfig::new(server.uri(), API_KEY));
    let err = loader.load_movies().await.unwrap_err();
    assert!(matches!(err, LoadError::HttpStatus(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn missing_poster_fails_question() {
    let server = MockServer::start().await;
    mount_movies(
        &server,
        json!({
            "items": [{
                "fullTitle": "Lost Poster (1999)",
                "imDbRating": "8.0",
                "image": format!("{}/posters/missing.jpg", server.uri()),
            }]
        }),
    )
    .await;

    let factory = factory_for(&server);
    factory.load_all().await.unwrap();

    let err = factory.request_next().await.unwrap_err();
    assert!(matches!(err, LoadError::HttpStatus(status) if status.as_u16() == 404));
}

#[tokio::test]
async fn request_before_load_yields_nothing() {
    let server = MockServer::start().await;
    let question = factory_for(&server).request_next().await.unwrap();
    assert!(question.is_none());
}
