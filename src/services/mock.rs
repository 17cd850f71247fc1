//! Mock service adapters with simulated latency.
//!
//! Every adapter here is a stand-in for a real backend call, explicitly
//! marked for future API integration. Responses are hard-coded; latency is
//! simulated with `tokio::time::sleep` so the UI exercises its loading and
//! typing states. Constructing an adapter with [`instant`](MockAuthService::instant)
//! disables the delays, which keeps tests fast and deterministic.

use crate::domain::{
    Book, BookDraft, BookRef, BookStatus, Category, Identity, Page, Role, TeacherBook,
};
use crate::services::ports::{
    AssistantService, AuthService, CatalogService, ServiceError, ServiceResult,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Simulated network delay for login requests.
const LOGIN_LATENCY: Duration = Duration::from_millis(1500);
/// Simulated network delay for registration requests.
const REGISTER_LATENCY: Duration = Duration::from_millis(2000);
/// Simulated network delay for catalog listing.
const LIST_LATENCY: Duration = Duration::from_millis(1000);
/// Simulated network delay for page content fetches.
const PAGE_LATENCY: Duration = Duration::from_millis(150);
/// Simulated thinking time before an assistant reply.
const REPLY_LATENCY: Duration = Duration::from_millis(1500);

/// Mock total page count used for every book until real content exists.
pub const MOCK_TOTAL_PAGES: u32 = 45;

async fn simulate(enabled: bool, latency: Duration) {
    if enabled {
        tokio::time::sleep(latency).await;
    }
}

/// Picks one entry from a fixed template pool.
///
/// Decorative randomness only: the sub-second clock is plenty to keep
/// repeated replies from feeling canned, and it avoids carrying an RNG
/// dependency for a mock.
fn pick<'a>(pool: &'a [&'a str]) -> &'a str {
    let idx = chrono::Utc::now().timestamp_subsec_millis() as usize % pool.len();
    pool[idx]
}

/// The fixed mock catalog served by [`MockCatalogService`].
pub(crate) fn mock_catalog() -> Vec<Book> {
    vec![
        Book {
            id: "1".to_string(),
            title: "Everyday Science for Lower Secondary".to_string(),
            author: "Dr. Somchai Wittayakom".to_string(),
            description: "Explains natural phenomena in an engaging way, with \
                          experiments you can try at home."
                .to_string(),
            rating: 4.8,
            students_count: 1205,
            category: Category::Science,
        },
        Book {
            id: "2".to_string(),
            title: "Foundations of Mathematics for Life".to_string(),
            author: "Somying Lekkanit".to_string(),
            description: "Learn mathematics through real everyday situations, \
                          making it easy to understand and apply."
                .to_string(),
            rating: 4.6,
            students_count: 892,
            category: Category::Math,
        },
        Book {
            id: "3".to_string(),
            title: "Thai History: Remarkable Stories".to_string(),
            author: "Prof. Pimjai Prawattisat".to_string(),
            description: "Discover fascinating stories from Thai history \
                          through a fresh perspective for young readers."
                .to_string(),
            rating: 4.9,
            students_count: 756,
            category: Category::History,
        },
        Book {
            id: "4".to_string(),
            title: "English for Communication".to_string(),
            author: "Somjai Phasadee".to_string(),
            description: "Learn English through real situations, with practice \
                          techniques that actually work."
                .to_string(),
            rating: 4.7,
            students_count: 634,
            category: Category::Language,
        },
    ]
}

/// Mock authentication: always succeeds after a fixed delay.
///
/// No credential store exists; a real adapter must reject invalid
/// credentials and duplicate registrations through [`ServiceError`].
pub struct MockAuthService {
    latency: bool,
    next_id: AtomicU64,
}

impl MockAuthService {
    #[must_use]
    pub fn new() -> Self {
        Self {
            latency: true,
            next_id: AtomicU64::new(1),
        }
    }

    /// Zero-latency variant for tests.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            latency: false,
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MockAuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, email: &str, _password: &str, role: Role) -> ServiceResult<Identity> {
        simulate(self.latency, LOGIN_LATENCY).await;

        let name = match role {
            Role::Teacher => "Ajarn Somchai",
            Role::Student => "Somying",
        };
        tracing::debug!(email = %email, role = ?role, "mock login succeeded");
        Ok(Identity {
            id: self.next_id.fetch_add(1, Ordering::Relaxed).to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
        })
    }

    async fn register(
        &self,
        email: &str,
        _password: &str,
        name: &str,
        role: Role,
    ) -> ServiceResult<Identity> {
        simulate(self.latency, REGISTER_LATENCY).await;

        tracing::debug!(email = %email, role = ?role, "mock registration succeeded");
        Ok(Identity {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
        })
    }
}

/// Mock catalog and content service backed by a fixed in-memory book set.
pub struct MockCatalogService {
    latency: bool,
    books: Vec<Book>,
}

impl MockCatalogService {
    #[must_use]
    pub fn new() -> Self {
        Self {
            latency: true,
            books: mock_catalog(),
        }
    }

    /// Zero-latency variant for tests.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            latency: false,
            books: mock_catalog(),
        }
    }

    fn find(&self, book_id: &str) -> ServiceResult<&Book> {
        self.books
            .iter()
            .find(|b| b.id == book_id)
            .ok_or_else(|| ServiceError::NotFound(format!("book {book_id}")))
    }
}

impl Default for MockCatalogService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogService for MockCatalogService {
    async fn list_books(&self, filter: Option<Category>) -> ServiceResult<Vec<Book>> {
        simulate(self.latency, LIST_LATENCY).await;

        let books = self
            .books
            .iter()
            .filter(|b| filter.map_or(true, |c| b.category == c))
            .cloned()
            .collect();
        Ok(books)
    }

    async fn book(&self, book_id: &str) -> ServiceResult<Book> {
        self.find(book_id).cloned()
    }

    async fn page_content(&self, book_id: &str, page: u32) -> ServiceResult<Page> {
        simulate(self.latency, PAGE_LATENCY).await;
        self.find(book_id)?;

        // Pages 1 and 2 carry worked-out mock content; the rest are
        // placeholders until real content retrieval lands.
        let content = match page {
            1 => Page {
                title: "Chapter 1: The Motion of Objects".to_string(),
                body: "Motion is a phenomenon we encounter constantly in daily \
                       life, from people walking to animals running to \
                       vehicles of every kind.\n\nIn this chapter we will \
                       learn about:\n- the meaning of motion\n- types of \
                       motion\n- speed and acceleration\n- Newton's laws of \
                       motion\n\nMotion means a change in the position of an \
                       object relative to a reference point over time.\n\n\
                       Everyday examples:\n1. A car on the road moves in a \
                       straight line.\n2. The hands of a clock move in a \
                       circle.\n3. A ball thrown into the air follows a \
                       curved path.\n\nStudying motion helps us understand \
                       nature and apply it when designing machines and \
                       technology."
                    .to_string(),
            },
            2 => Page {
                title: "Speed and Acceleration".to_string(),
                body: "Speed is the rate of change of distance per unit of \
                       time.\n\nFormula:\nspeed = distance / time\nv = s / t\n\n\
                       Units of speed:\n- metres per second (m/s)\n- \
                       kilometres per hour (km/h)\n- miles per hour (mph)\n\n\
                       Acceleration is the rate of change of speed per unit \
                       of time.\n\nFormula:\nacceleration = change in speed / \
                       time\na = (v2 - v1) / t\n\nWorked example:\nA car \
                       travels at 60 km/h for 2 hours.\nDistance covered = \
                       60 x 2 = 120 kilometres."
                    .to_string(),
            },
            n => Page {
                title: format!("Page {n}"),
                body: "This page's content is still being prepared...".to_string(),
            },
        };
        Ok(content)
    }

    async fn page_count(&self, book_id: &str) -> ServiceResult<u32> {
        self.find(book_id)?;
        Ok(MOCK_TOTAL_PAGES)
    }

    async fn mark_completed(&self, book_id: &str) -> ServiceResult<()> {
        simulate(self.latency, PAGE_LATENCY).await;
        self.find(book_id)?;
        tracing::info!(book_id = %book_id, "mock completion recorded");
        Ok(())
    }

    async fn list_managed_books(&self) -> ServiceResult<Vec<TeacherBook>> {
        simulate(self.latency, LIST_LATENCY).await;

        Ok(vec![
            TeacherBook {
                id: "1".to_string(),
                title: "Everyday Science for Lower Secondary".to_string(),
                author: "Dr. Somchai Wittayakom".to_string(),
                category: Category::Science,
                students_count: 1205,
                chats_count: 3420,
                rating: 4.8,
                status: BookStatus::Active,
            },
            TeacherBook {
                id: "2".to_string(),
                title: "Foundations of Mathematics for Life".to_string(),
                author: "Somying Lekkanit".to_string(),
                category: Category::Math,
                students_count: 892,
                chats_count: 2156,
                rating: 4.6,
                status: BookStatus::Active,
            },
        ])
    }

    async fn create_book(&self, draft: BookDraft) -> ServiceResult<TeacherBook> {
        simulate(self.latency, LIST_LATENCY).await;

        let category = draft
            .category
            .ok_or_else(|| ServiceError::Unavailable("category is required".to_string()))?;
        tracing::info!(title = %draft.title, "mock book created");
        Ok(TeacherBook {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            title: draft.title,
            author: draft.author,
            category,
            students_count: 0,
            chats_count: 0,
            rating: 0.0,
            status: BookStatus::Draft,
        })
    }
}

/// Mock assistant: one templated reply per user message.
///
/// The template pool is keyed by context (page + book / book only / neither),
/// mirroring how the real assistant will receive reading context. No
/// inference happens here.
pub struct MockAssistantService {
    latency: bool,
}

impl MockAssistantService {
    #[must_use]
    pub fn new() -> Self {
        Self { latency: true }
    }

    /// Zero-latency variant for tests.
    #[must_use]
    pub fn instant() -> Self {
        Self { latency: false }
    }
}

impl Default for MockAssistantService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssistantService for MockAssistantService {
    async fn reply(
        &self,
        book: Option<&BookRef>,
        page: Option<(u32, &str)>,
        _text: &str,
    ) -> ServiceResult<String> {
        simulate(self.latency, REPLY_LATENCY).await;

        let reply = match (book, page) {
            (Some(book), Some((number, title))) => {
                let pool = [
                    "Looking at page {page} (\"{title}\"), let me walk you \
                     through it.\n\nThe key idea on this page is the motion \
                     of objects, a foundation of physics. Here is an easy \
                     way to think about it...",
                    "Great question about page {page}! As \"{book}\" \
                     explains, this section says...\n\nLet me give you a \
                     real-life example: when you ride in a car...",
                    "From page {page}, which covers \"{title}\", here is a \
                     simple explanation.\n\nThe formula v = s / t in the \
                     book means...",
                    "Page {page} explains \"{title}\" in detail. Let me \
                     summarize the key points for you.\n\nThe thing to \
                     remember is...",
                ];
                pick(&pool)
                    .replace("{page}", &number.to_string())
                    .replace("{title}", title)
                    .replace("{book}", &book.title)
            }
            (Some(book), None) => {
                let pool = [
                    "That's an interesting topic from \"{book}\". Let me \
                     explain it the way the book does.\n\nChapter 1 covers \
                     the motion of objects, an important foundation...",
                    "{author}'s book discusses this in chapter 3, where it \
                     explains...\n\nHere is a simpler example to make it \
                     click...",
                    "Great question! According to \"{book}\", you can think \
                     of it like this...\n\nThe key point is...",
                    "From \"{book}\", let me tell you the story.\n\nThe \
                     opening chapters explain...",
                ];
                pick(&pool)
                    .replace("{book}", &book.title)
                    .replace("{author}", &book.author)
            }
            _ => "Happy to help! Pick a book from the library and I can go \
                  deeper, or ask me anything you are curious about."
                .to_string(),
        };
        Ok(reply)
    }
}
