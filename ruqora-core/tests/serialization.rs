use ruqora_core::*;
use serde_json::{self as json, Value};

fn parse(json_str: &str) -> Value {
    json::from_str(json_str).expect("valid json")
}

fn sample_author() -> Author {
    Author {
        user_id: "55555555-5555-4555-8555-555555555555".to_string(),
        username: "alice".to_string(),
    }
}

fn sample_answer() -> Answer {
    Answer {
        answer_id: "33333333-3333-4333-8333-333333333333".to_string(),
        question_id: "22222222-2222-4222-8222-222222222222".to_string(),
        content: "try rustup".to_string(),
        author: sample_author(),
        created_at: "2025-11-02T10:20:35.000Z".to_string(),
        upvotes: vec!["44444444-4444-4444-8444-444444444444".to_string()],
        downvotes: vec![],
    }
}

/*
    Obiettivo test:
    verificare che RegisterResponse venga serializzato nel JSON con i nomi campo giusti (camelCase)
    e che lo stesso JSON sia deserializzabile di nuovo nello stesso valore Rust
*/
#[test]
fn http_register_response_roundtrip() {
    let user = User {
        user_id: "55555555-5555-4555-8555-555555555555".to_string(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        created_at: "2025-11-02T10:10:10.000Z".to_string(),
    };
    let resp = RegisterResponse { token: "token123".to_string(), user: user.clone() };

    let s = json::to_string(&resp).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["token"], "token123");
    assert_eq!(v["user"]["userId"], user.user_id);
    assert_eq!(v["user"]["username"], user.username);
    assert_eq!(v["user"]["email"], user.email);
    assert_eq!(v["user"]["createdAt"], user.created_at);

    let back: RegisterResponse = json::from_str(&s).expect("deserialize");
    assert_eq!(back.user, user);
    assert_eq!(back.token, "token123");
}

/*
    Obiettivo test:
    verificare che una Question con risposta annidata e insiemi di voti venga serializzata
    con i nomi campo attesi (questionId, createdAt, answers[0].answerId, upvotes come lista
    di userId) e che il JSON torni allo stesso valore Rust
*/
#[test]
fn question_with_nested_answer_roundtrip() {
    let q = Question {
        question_id: "22222222-2222-4222-8222-222222222222".to_string(),
        title: "How do I install Rust?".to_string(),
        content: "Coming from another language.".to_string(),
        author: sample_author(),
        created_at: "2025-11-02T10:20:30.000Z".to_string(),
        answers: vec![sample_answer()],
        upvotes: vec![
            "44444444-4444-4444-8444-444444444444".to_string(),
            "66666666-6666-4666-8666-666666666666".to_string(),
        ],
        downvotes: vec!["77777777-7777-4777-8777-777777777777".to_string()],
    };

    let s = json::to_string(&q).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["questionId"], q.question_id);
    assert_eq!(v["title"], q.title);
    assert_eq!(v["author"]["userId"], q.author.user_id);
    assert_eq!(v["author"]["username"], "alice");
    assert_eq!(v["createdAt"], q.created_at);
    assert_eq!(v["answers"][0]["answerId"], q.answers[0].answer_id);
    assert_eq!(v["answers"][0]["questionId"], q.question_id);
    assert_eq!(v["answers"][0]["upvotes"][0], q.answers[0].upvotes[0]);
    assert_eq!(v["upvotes"][1], q.upvotes[1]);
    assert_eq!(v["downvotes"][0], q.downvotes[0]);
    // l'Author non espone l'email
    assert!(v["author"]["email"].is_null());

    let back: Question = json::from_str(&s).expect("deserialize");
    assert_eq!(back, q);
    assert_eq!(back.score(), 1); // 2 upvotes - 1 downvote
    assert_eq!(back.answers[0].score(), 1);
}

/*
    Obiettivo test: le due direzioni di voto viaggiano come "upvote"/"downvote"
    sia in richiesta che in risposta, e tornano allo stesso valore Rust
*/
#[test]
fn vote_request_wire_directions() {
    let up = VoteRequest { vote_type: VoteType::Upvote };
    let down = VoteRequest { vote_type: VoteType::Downvote };

    let s_up = json::to_string(&up).expect("serialize");
    let s_down = json::to_string(&down).expect("serialize");

    assert_eq!(parse(&s_up)["voteType"], "upvote");
    assert_eq!(parse(&s_down)["voteType"], "downvote");

    let back: VoteRequest = json::from_str(r#"{"voteType":"downvote"}"#).expect("deserialize");
    assert_eq!(back.vote_type, VoteType::Downvote);
}

/*
    Obiettivo test: VoteResponse espone i conteggi aggiornati e lo stato del
    chiamante; userVote è null quando il voto è stato tolto (toggle off)
*/
#[test]
fn vote_response_roundtrip() {
    let resp = VoteResponse { upvotes: 3, downvotes: 1, score: 2, user_vote: Some(VoteType::Upvote) };

    let s = json::to_string(&resp).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["upvotes"], 3);
    assert_eq!(v["downvotes"], 1);
    assert_eq!(v["score"], 2);
    assert_eq!(v["userVote"], "upvote");

    let cleared = VoteResponse { upvotes: 0, downvotes: 0, score: 0, user_vote: None };
    let v = parse(&json::to_string(&cleared).expect("serialize"));
    assert!(v["userVote"].is_null());

    let back: VoteResponse = json::from_str(&s).expect("deserialize");
    assert_eq!(back, resp);
}

/*
    Obiettivo test: UserStats usa i nomi campo che il client del profilo
    si aspetta (questionsCount, answersCount, totalUpvotes)
*/
#[test]
fn user_stats_shape() {
    let stats = UserStats { questions_count: 2, answers_count: 5, total_upvotes: 4 };

    let s = json::to_string(&stats).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["questionsCount"], 2);
    assert_eq!(v["answersCount"], 5);
    assert_eq!(v["totalUpvotes"], 4);

    let back: UserStats = json::from_str(&s).expect("deserialize");
    assert_eq!(back, stats);
}

/*
    Obiettivo test: ogni errore dell'API ha corpo { "message": "..." }
*/
#[test]
fn error_body_shape() {
    let body = ErrorBody::new("Question not found");

    let s = json::to_string(&body).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["message"], "Question not found");

    let back: ErrorBody = json::from_str(&s).expect("deserialize");
    assert_eq!(back, body);
}

/*
    Obiettivo test: i campi stringa mancanti nelle richieste diventano stringa
    vuota (serde default), così la validazione del server li rifiuta con 400
    invece di un rifiuto generico dell'estrattore
*/
#[test]
fn request_missing_fields_default_to_empty() {
    let req: RegisterRequest = json::from_str("{}").expect("deserialize");
    assert!(req.username.is_empty());
    assert!(req.email.is_empty());
    assert!(req.password.is_empty());

    let req: CreateQuestionRequest =
        json::from_str(r#"{"title":"only a title"}"#).expect("deserialize");
    assert_eq!(req.title, "only a title");
    assert!(req.content.is_empty());

    let req: CreateAnswerRequest = json::from_str("{}").expect("deserialize");
    assert!(req.content.is_empty());
}
