mod common;

use anyhow::Result;
use common::{seed_user, setup_pool};
use ruqora_core::VoteType;
use ruqora_server::stats::user_stats;
use ruqora_server::store;
use ruqora_server::votes::{cast_vote, VoteTarget};

#[tokio::test]
async fn fresh_user_has_zero_stats() -> Result<()> {
    let (_td, pool) = setup_pool().await?;
    let alice = seed_user(&pool, "alice").await?;

    let s = user_stats(&pool, &alice.user_id).await?;
    assert_eq!(s.questions_count, 0);
    assert_eq!(s.answers_count, 0);
    assert_eq!(s.total_upvotes, 0);
    Ok(())
}

// I contatori seguono solo i contenuti scritti dall'utente.
#[tokio::test]
async fn counts_follow_authored_questions_and_answers() -> Result<()> {
    let (_td, pool) = setup_pool().await?;
    let alice = seed_user(&pool, "alice").await?;
    let bob = seed_user(&pool, "bob").await?;

    store::create_question(&pool, &alice, "Generics", "Come si vincola un tipo?").await?;
    store::create_question(&pool, &alice, "Traits", "Oggetto o generico?").await?;
    let bq = store::create_question(&pool, &bob, "Macro", "Quando usarle?").await?;

    store::append_answer(&pool, &bq.question_id, &alice, "Quasi mai all'inizio").await?;
    store::append_answer(&pool, &bq.question_id, &alice, "derive conta come macro?").await?;
    store::append_answer(&pool, &bq.question_id, &bob, "Grazie a entrambi").await?;

    let s = user_stats(&pool, &alice.user_id).await?;
    assert_eq!(s.questions_count, 2);
    // le risposte di bob non contano per alice
    assert_eq!(s.answers_count, 2);

    let sb = user_stats(&pool, &bob.user_id).await?;
    assert_eq!(sb.questions_count, 1);
    assert_eq!(sb.answers_count, 1);
    Ok(())
}

// totalUpvotes somma gli upvote ricevuti sulle domande dell'utente:
// i downvote non sottraggono, i voti sulle sue risposte non contano,
// e i voti che l'utente dà agli altri nemmeno.
#[tokio::test]
async fn total_upvotes_counts_question_upvotes_only() -> Result<()> {
    let (_td, pool) = setup_pool().await?;
    let alice = seed_user(&pool, "alice").await?;
    let bob = seed_user(&pool, "bob").await?;
    let carol = seed_user(&pool, "carol").await?;
    let dave = seed_user(&pool, "dave").await?;

    let q1 = store::create_question(&pool, &alice, "Ownership", "Move o borrow?").await?;
    let q2 = store::create_question(&pool, &alice, "Errori", "anyhow o thiserror?").await?;

    // 3 upvote su q1, 1 su q2, più un downvote che non deve sottrarre
    for voter in [&bob, &carol, &dave] {
        cast_vote(
            &pool,
            VoteTarget::Question(&q1.question_id),
            &voter.user_id,
            VoteType::Upvote,
        )
        .await?;
    }
    cast_vote(&pool, VoteTarget::Question(&q2.question_id), &bob.user_id, VoteType::Upvote)
        .await?;
    cast_vote(&pool, VoteTarget::Question(&q2.question_id), &carol.user_id, VoteType::Downvote)
        .await?;

    // upvote sulle risposte di alice: fuori dal totale
    let bq = store::create_question(&pool, &bob, "Testing", "Unit o integrazione?").await?;
    let answer = store::append_answer(&pool, &bq.question_id, &alice, "Entrambi").await?;
    cast_vote(&pool, VoteTarget::Answer(&answer.answer_id), &carol.user_id, VoteType::Upvote)
        .await?;
    cast_vote(&pool, VoteTarget::Answer(&answer.answer_id), &dave.user_id, VoteType::Upvote)
        .await?;

    let s = user_stats(&pool, &alice.user_id).await?;
    assert_eq!(s.total_upvotes, 4);

    // dare voti non conta: contano solo quelli ricevuti
    let sb = user_stats(&pool, &bob.user_id).await?;
    assert_eq!(sb.total_upvotes, 0);
    Ok(())
}

// Un upvote tolto con il toggle sparisce anche dalle statistiche.
#[tokio::test]
async fn toggled_off_upvotes_leave_the_total() -> Result<()> {
    let (_td, pool) = setup_pool().await?;
    let alice = seed_user(&pool, "alice").await?;
    let bob = seed_user(&pool, "bob").await?;
    let q = store::create_question(&pool, &alice, "Moduli", "mod.rs o file singoli?").await?;

    cast_vote(&pool, VoteTarget::Question(&q.question_id), &bob.user_id, VoteType::Upvote)
        .await?;
    assert_eq!(user_stats(&pool, &alice.user_id).await?.total_upvotes, 1);

    cast_vote(&pool, VoteTarget::Question(&q.question_id), &bob.user_id, VoteType::Upvote)
        .await?;
    assert_eq!(user_stats(&pool, &alice.user_id).await?.total_upvotes, 0);
    Ok(())
}
