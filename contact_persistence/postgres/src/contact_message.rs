use std::collections::HashMap;

use bb8_postgres::tokio_postgres::{types::ToSql, Row};
use contact_models::{
    message::{ContactMessage, ContactMessageFilter, ContactMessageId, Reader},
    pagination::PaginationSlice,
};
use contact_persistence_contracts::contact_message::ContactMessageRepository;
use uuid::Uuid;

use crate::{arg_indices, columns, PostgresTransaction};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresContactMessageRepository;

columns!(message as "m": "id", "message", "reason", "archived", "responded", "sender_alias", "sender_phone", "sender_email", "sender_ip", "sender_user_agent", "time_created", "time_updated");
columns!(reader as "r": "contact_message_id", "user_id", "flagged", "time_updated");

impl ContactMessageRepository<PostgresTransaction> for PostgresContactMessageRepository {
    async fn count(
        &self,
        txn: &mut PostgresTransaction,
        filter: &ContactMessageFilter,
    ) -> anyhow::Result<u64> {
        let reason = filter.reason.map(|reason| reason.as_str().to_owned());
        let mut query = "select count(*) from contact_messages m where true".to_owned();
        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();
        push_filter(filter, &reason, &mut query, &mut params);

        txn.txn()
            .query_one(&query, &params)
            .await
            .map(|row| row.get::<_, i64>(0) as _)
            .map_err(Into::into)
    }

    async fn list(
        &self,
        txn: &mut PostgresTransaction,
        filter: &ContactMessageFilter,
        pagination: PaginationSlice,
    ) -> anyhow::Result<Vec<ContactMessage>> {
        let reason = filter.reason.map(|reason| reason.as_str().to_owned());
        let mut query = format!("select {MESSAGE_COLS} from contact_messages m where true");
        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();
        push_filter(filter, &reason, &mut query, &mut params);
        query.push_str(&format!(
            " order by m.time_created asc limit {} offset {}",
            *pagination.limit, pagination.offset
        ));

        let mut messages = txn
            .txn()
            .query(&query, &params)
            .await
            .map_err(anyhow::Error::from)
            .and_then(|rows| rows.iter().map(decode_message).collect::<Result<Vec<_>, _>>())?;

        let ids = messages.iter().map(|msg| *msg.id).collect::<Vec<Uuid>>();
        let mut readers = self.readers_by_message(txn, &ids).await?;
        for message in &mut messages {
            message.readers = readers.remove(&*message.id).unwrap_or_default();
        }

        Ok(messages)
    }

    async fn get(
        &self,
        txn: &mut PostgresTransaction,
        id: ContactMessageId,
    ) -> anyhow::Result<Option<ContactMessage>> {
        let row = txn
            .txn()
            .query_opt(
                &format!("select {MESSAGE_COLS} from contact_messages m where id=$1"),
                &[&*id],
            )
            .await?;

        let Some(row) = row else { return Ok(None) };
        let mut message = decode_message(&row)?;
        message.readers = self
            .readers_by_message(txn, &[*id])
            .await?
            .remove(&*id)
            .unwrap_or_default();

        Ok(Some(message))
    }

    async fn create(
        &self,
        txn: &mut PostgresTransaction,
        message: &ContactMessage,
    ) -> anyhow::Result<()> {
        txn.txn()
            .execute(
                &format!(
                    "insert into contact_messages ({MESSAGE_COL_NAMES}) values ({})",
                    arg_indices(1..=MESSAGE_CNT)
                ),
                &[
                    &*message.id,
                    &message.message.as_str(),
                    &message.reason.as_str(),
                    &message.archived,
                    &message.responded,
                    &message.sender.alias.as_str(),
                    &message.sender.phone.as_ref().map(|phone| phone.as_str()),
                    &message.sender.email.as_str(),
                    &message.sender.ip,
                    &message.sender.user_agent,
                    &message.time_created,
                    &message.time_updated,
                ],
            )
            .await?;

        for reader in &message.readers {
            txn.txn()
                .execute(
                    &format!(
                        "insert into contact_message_readers ({READER_COL_NAMES}) values ({})",
                        arg_indices(1..=READER_CNT)
                    ),
                    &[
                        &*message.id,
                        &reader.user_id.as_str(),
                        &reader.flagged,
                        &reader.time_updated,
                    ],
                )
                .await?;
        }

        Ok(())
    }
}

impl PostgresContactMessageRepository {
    async fn readers_by_message(
        &self,
        txn: &mut PostgresTransaction,
        ids: &[Uuid],
    ) -> anyhow::Result<HashMap<Uuid, Vec<Reader>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = txn
            .txn()
            .query(
                &format!(
                    "select {READER_COLS} from contact_message_readers r where \
                     contact_message_id=any($1) order by r.time_updated asc"
                ),
                &[&ids],
            )
            .await?;

        let mut out = HashMap::<Uuid, Vec<Reader>>::new();
        for row in rows {
            let (message_id, reader) = decode_reader(&row)?;
            out.entry(message_id).or_default().push(reader);
        }
        Ok(out)
    }
}

fn push_filter<'a>(
    filter: &'a ContactMessageFilter,
    reason: &'a Option<String>,
    query: &mut String,
    params: &mut Vec<&'a (dyn ToSql + Sync)>,
) {
    if let Some(reason) = reason {
        params.push(reason);
        query.push_str(&format!(" and reason=${}", params.len()));
    }
    if let Some(archived) = &filter.archived {
        params.push(archived);
        query.push_str(&format!(" and archived=${}", params.len()));
    }
    if let Some(responded) = &filter.responded {
        params.push(responded);
        query.push_str(&format!(" and responded=${}", params.len()));
    }
}

fn decode_message(row: &Row) -> anyhow::Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.get::<_, Uuid>(0).into(),
        message: row.get::<_, String>(1).try_into()?,
        reason: row.get::<_, String>(2).parse()?,
        archived: row.get(3),
        responded: row.get(4),
        sender: contact_models::message::Sender {
            alias: row.get::<_, String>(5).try_into()?,
            phone: row
                .get::<_, Option<String>>(6)
                .map(TryInto::try_into)
                .transpose()?,
            email: row.get::<_, String>(7).parse()?,
            ip: row.get(8),
            user_agent: row.get(9),
        },
        readers: Vec::new(),
        time_created: row.get(10),
        time_updated: row.get(11),
    })
}

fn decode_reader(row: &Row) -> anyhow::Result<(Uuid, Reader)> {
    Ok((
        row.get(0),
        Reader {
            user_id: row.get::<_, String>(1).try_into()?,
            flagged: row.get(2),
            time_updated: row.get(3),
        },
    ))
}
