use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};

use crate::book::{Book, BookFields};
use crate::error::StoreError;

/// All operations target one fixed collection.
const COLLECTION: &str = "Booksdata";
/// Fallback when the connection URI names no default database.
const DEFAULT_DATABASE: &str = "bookstore";

/// Sole owner of the MongoDB handle. Handlers go through these five
/// operations and never touch the driver directly; concurrency safety
/// is the driver pool's problem.
#[derive(Clone)]
pub(crate) struct BookStore {
    database: Database,
    books: Collection<Book>,
}

impl BookStore {
    pub(crate) async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        let books = database.collection(COLLECTION);
        Ok(Self { database, books })
    }

    /// One round-trip to the server. The caller decides whether a
    /// failure is fatal; the driver itself connects lazily.
    pub(crate) async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// An empty collection is an empty vec, never an error.
    pub(crate) async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.find(doc! {}).await?.try_collect().await?)
    }

    /// `Ok(None)` for a well-formed but unmatched id; a malformed id is
    /// a store failure, not an absence.
    pub(crate) async fn get_by_id(&self, id: &str) -> Result<Option<Book>, StoreError> {
        Ok(self.books.find_one(doc! { "_id": parse_id(id)? }).await?)
    }

    /// First match on an exact field value, or `Ok(None)`.
    pub(crate) async fn get_by_field(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<Book>, StoreError> {
        let mut filter = Document::new();
        filter.insert(field, value);
        Ok(self.books.find_one(filter).await?)
    }

    /// The store assigns the identifier.
    pub(crate) async fn insert(&self, fields: BookFields) -> Result<Book, StoreError> {
        let result = self.fields_collection().insert_one(&fields).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Operation {
                reason: format!("insert returned a non-ObjectId key: {}", result.inserted_id),
            })?;
        Ok(Book::with_id(id, fields))
    }

    /// Full replacement, not a merge: attributes missing from `fields`
    /// are gone from the stored document afterwards. Returns the
    /// post-update document, or `Ok(None)` if the id matched nothing.
    pub(crate) async fn replace_by_id(
        &self,
        id: &str,
        fields: BookFields,
    ) -> Result<Option<Book>, StoreError> {
        let oid = parse_id(id)?;
        let replaced = self
            .fields_collection()
            .find_one_and_replace(doc! { "_id": oid }, &fields)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(replaced.map(|fields| Book::with_id(oid, fields)))
    }

    // The read side decodes `_id` into `Book`; writes carry only the
    // mutable attributes.
    fn fields_collection(&self) -> Collection<BookFields> {
        self.books.clone_with_type()
    }
}

fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|source| StoreError::InvalidId {
        id: id.to_string(),
        source,
    })
}
