//! Update loop: converts teloxide updates to [`InboundEvent`]s and hands
//! them to the [`UpdateDispatcher`].
//!
//! Messages are processed in a spawned task per event so the loop keeps
//! polling; callback queries are handled inline and acknowledged afterwards.
//! Updates missing required fields (no text, no sender, no originating
//! message) are logged and dropped.

use std::sync::Arc;

use anyhow::Result;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tracing::{error, info};

use aggregator_core::InboundEvent;

use crate::dispatcher::UpdateDispatcher;

/// Starts the long-polling loop with the given teloxide Bot and dispatcher.
/// Runs until the process is stopped.
pub async fn run_dispatcher(bot: teloxide::Bot, dispatcher: Arc<UpdateDispatcher>) -> Result<()> {
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_message(
    msg: teloxide::types::Message,
    dispatcher: Arc<UpdateDispatcher>,
) -> ResponseResult<()> {
    let (Some(text), Some(from)) = (msg.text(), msg.from.as_ref()) else {
        info!(chat_id = msg.chat.id.0, "Dropping message without text or sender");
        return Ok(());
    };

    let event = InboundEvent::Message {
        chat_id: msg.chat.id.0,
        sender_id: from.id.0 as i64,
        text: text.to_string(),
    };
    info!(
        chat_id = msg.chat.id.0,
        sender_id = from.id.0,
        "Received message"
    );

    // Dispatch in a spawned task so the update loop keeps polling.
    tokio::spawn(async move {
        if let Err(e) = dispatcher.dispatch(event).await {
            error!(error = %e, "Update dispatch failed");
        }
    });

    Ok(())
}

async fn handle_callback(
    query: CallbackQuery,
    bot: teloxide::Bot,
    dispatcher: Arc<UpdateDispatcher>,
) -> ResponseResult<()> {
    let (Some(payload), Some(message)) = (query.data.clone(), query.message.as_ref()) else {
        info!(callback_id = %query.id, "Dropping callback without payload or message");
        bot.answer_callback_query(query.id).await?;
        return Ok(());
    };

    let event = InboundEvent::ButtonPress {
        chat_id: message.chat().id.0,
        sender_id: query.from.id.0 as i64,
        message_id: message.id().0,
        payload,
    };
    info!(
        chat_id = message.chat().id.0,
        sender_id = query.from.id.0,
        "Received button press"
    );

    if let Err(e) = dispatcher.dispatch(event).await {
        error!(error = %e, "Update dispatch failed");
    }

    bot.answer_callback_query(query.id).await?;
    Ok(())
}
