use std::sync::Arc;

use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    models::{
        categories::Template,
        posts::{Comment, Post, PostDraft, PostUpdate},
        query::FeedQuery,
        users::User,
    },
    repositories::{post_repo::PostRepository, template_repo::TemplateRepository},
    Result,
};

/// Related-posts strip on the detail page.
const RELATED_LIMIT: u32 = 4;

/// One planner-resolved page of a feed, ready for the view layer.
#[derive(Debug)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub total_pages: u64,
    pub current_page: u32,
}

#[derive(Clone)]
pub struct PostsService {
    posts: Arc<dyn PostRepository>,
    templates: Arc<dyn TemplateRepository>,
}

impl PostsService {
    pub fn new(posts: Arc<dyn PostRepository>, templates: Arc<dyn TemplateRepository>) -> Self {
        Self { posts, templates }
    }

    pub async fn feed(&self, query: &FeedQuery) -> Result<FeedPage> {
        let posts = self.posts.find_posts(query).await?;
        let count = self.posts.count_posts(query).await?;

        Ok(FeedPage {
            posts,
            total_pages: query.total_pages(count),
            current_page: query.page,
        })
    }

    pub async fn templates(&self) -> Result<Vec<Template>> {
        self.templates.all_templates().await
    }

    /// Assemble the in-transit draft from the compose form. The content
    /// body falls back to the dictated text when the typed field came back
    /// empty, and the author's display name is snapshotted here.
    pub fn build_draft(
        author: &User,
        title: String,
        content: Option<String>,
        audio_text: Option<String>,
        image_post: String,
        category: Vec<String>,
    ) -> PostDraft {
        let content = content
            .filter(|c| !c.is_empty())
            .or(audio_text)
            .unwrap_or_default();

        PostDraft {
            title,
            content,
            image_post,
            account_id: author.id,
            account_name: author.display_name(),
            category,
        }
    }

    pub async fn publish(&self, draft: PostDraft, template_id: Option<Uuid>) -> Result<Post> {
        let post = Post {
            id: Uuid::now_v7(),
            title: draft.title,
            content: draft.content,
            category: draft.category,
            account_id: draft.account_id,
            account_name: draft.account_name,
            image_post: draft.image_post,
            template_id,
            comments: Json(Vec::new()),
            views_count: 0,
            report_count: 0,
            created_at: Utc::now(),
        };

        self.posts.insert_post(&post).await?;
        Ok(post)
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        self.posts.find_post(post_id).await
    }

    /// Detail-page fetch: bumps the view counter (every visit counts, the
    /// author's own included) and returns the post as of the bump.
    pub async fn view_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        self.posts.increment_views(post_id).await
    }

    pub async fn related(&self, post: &Post) -> Result<Vec<Post>> {
        self.posts.related_posts(post, RELATED_LIMIT).await
    }

    pub async fn featured(&self) -> Result<Option<Post>> {
        self.posts.most_viewed().await
    }

    pub async fn comment(&self, post_id: Uuid, comment: Comment) -> Result<bool> {
        self.posts.append_comment(post_id, &comment).await
    }

    pub async fn report(&self, post_id: Uuid) -> Result<bool> {
        self.posts.increment_reports(post_id).await
    }

    pub async fn clear_reports(&self, post_id: Uuid) -> Result<bool> {
        self.posts.reset_reports(post_id).await
    }

    pub async fn update(&self, post_id: Uuid, update: &PostUpdate) -> Result<bool> {
        self.posts.update_post(post_id, update).await
    }

    pub async fn delete(&self, post_id: Uuid) -> Result<bool> {
        self.posts.delete_post(post_id).await
    }

    pub async fn reported(&self) -> Result<Vec<Post>> {
        self.posts.reported_posts().await
    }

    pub async fn all(&self) -> Result<Vec<Post>> {
        self.posts.all_posts().await
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        models::query::{FeedScope, PageParams},
        repositories::memory::MemoryStore,
    };

    use super::*;

    fn service() -> (PostsService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (PostsService::new(store.clone(), store.clone()), store)
    }

    fn author(first: &str, last: &str) -> User {
        User {
            id: Uuid::now_v7(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            address: "nowhere".to_string(),
            phone_number: "5550123".to_string(),
            occupation: "writer".to_string(),
            email: format!("{first}@example.com").to_lowercase(),
            password: "hash".to_string(),
            image_profile: None,
            created_at: Utc::now(),
        }
    }

    async fn publish_one(
        svc: &PostsService,
        user: &User,
        title: &str,
        content: &str,
        category: &[&str],
    ) -> Post {
        let draft = PostsService::build_draft(
            user,
            title.to_string(),
            Some(content.to_string()),
            None,
            "img.webp".to_string(),
            category.iter().map(|c| c.to_string()).collect(),
        );
        svc.publish(draft, None).await.unwrap()
    }

    fn params(page: Option<u32>, limit: Option<u32>, term: Option<&str>) -> PageParams {
        PageParams {
            page,
            limit,
            search_term: term.map(|t| t.to_string()),
        }
    }

    #[test]
    fn draft_content_falls_back_to_dictated_text() {
        let user = author("Ada", "Lovelace");
        let typed = PostsService::build_draft(
            &user,
            "t".into(),
            Some("typed".into()),
            Some("spoken".into()),
            "i".into(),
            vec![],
        );
        assert_eq!(typed.content, "typed");

        let dictated = PostsService::build_draft(
            &user,
            "t".into(),
            Some(String::new()),
            Some("spoken".into()),
            "i".into(),
            vec![],
        );
        assert_eq!(dictated.content, "spoken");
        assert_eq!(dictated.account_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn pages_concatenate_to_the_full_feed_newest_first() {
        let (svc, _) = service();
        let user = author("Ada", "Lovelace");
        let mut titles = Vec::new();
        for i in 0..9 {
            let title = format!("post {i}");
            publish_one(&svc, &user, &title, "body", &["tech"]).await;
            titles.push(title);
        }

        let mut seen = Vec::new();
        let mut total_pages = 0;
        for page in 1..=3 {
            let q = FeedQuery::feed(FeedScope::Global, &params(Some(page), None, None));
            let result = svc.feed(&q).await.unwrap();
            assert!(result.posts.len() <= q.limit as usize);
            assert_eq!(result.current_page, page);
            total_pages = result.total_pages;
            seen.extend(result.posts.into_iter().map(|p| p.title));
        }

        assert_eq!(total_pages, 3);
        titles.reverse();
        assert_eq!(seen, titles);
    }

    #[tokio::test]
    async fn empty_search_matches_the_whole_scope() {
        let (svc, _) = service();
        let user = author("Ada", "Lovelace");
        for i in 0..5 {
            publish_one(&svc, &user, &format!("post {i}"), "body", &["tech"]).await;
        }

        let unfiltered = FeedQuery::feed(FeedScope::Global, &params(None, Some(100), None));
        let empty_search = FeedQuery::search(FeedScope::Global, &params(None, Some(100), Some("")));

        let a = svc.feed(&unfiltered).await.unwrap();
        let b = svc.feed(&empty_search).await.unwrap();
        let ids = |page: &FeedPage| page.posts.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.total_pages, b.total_pages);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring_across_fields() {
        let (svc, _) = service();
        let ada = author("Ada", "Lovelace");
        let grace = author("Grace", "Hopper");
        publish_one(&svc, &ada, "Hello World", "body", &["tech"]).await;
        publish_one(&svc, &grace, "Other", "greetings and hello", &["life"]).await;
        publish_one(&svc, &grace, "Third", "body", &["HelloTag"]).await;
        publish_one(&svc, &grace, "Unrelated", "body", &["life"]).await;

        for term in ["HELLO", "hello"] {
            let q = FeedQuery::search(FeedScope::Global, &params(None, None, Some(term)));
            let result = svc.feed(&q).await.unwrap();
            assert_eq!(result.posts.len(), 3, "term {term}");
        }

        // Author-name matches only count where the scope searches them.
        let by_name = FeedQuery::search(FeedScope::Global, &params(None, None, Some("hopper")));
        assert_eq!(svc.feed(&by_name).await.unwrap().posts.len(), 3);
        let own = FeedQuery::own_search(grace.id, &params(None, None, Some("hopper")));
        assert_eq!(svc.feed(&own).await.unwrap().posts.len(), 0);
    }

    #[tokio::test]
    async fn category_scope_matches_tag_membership() {
        let (svc, _) = service();
        let user = author("Ada", "Lovelace");
        publish_one(&svc, &user, "one", "body", &["tech", "life"]).await;
        publish_one(&svc, &user, "two", "body", &["life"]).await;
        publish_one(&svc, &user, "three", "body", &["tech"]).await;

        let q = FeedQuery::feed(
            FeedScope::Category("tech".to_string()),
            &params(None, None, None),
        );
        let result = svc.feed(&q).await.unwrap();
        assert_eq!(result.posts.len(), 2);
        assert!(result.posts.iter().all(|p| p.category.contains(&"tech".to_string())));
    }

    #[tokio::test]
    async fn sequential_views_count_exactly() {
        let (svc, _) = service();
        let user = author("Ada", "Lovelace");
        let post = publish_one(&svc, &user, "t", "body", &[]).await;
        assert_eq!(post.views_count, 0);

        let mut latest = None;
        for _ in 0..5 {
            latest = svc.view_post(post.id).await.unwrap();
        }
        assert_eq!(latest.unwrap().views_count, 5);
    }

    #[tokio::test]
    async fn reports_increment_by_one_and_clear_to_zero() {
        let (svc, _) = service();
        let user = author("Ada", "Lovelace");
        let post = publish_one(&svc, &user, "t", "body", &[]).await;

        for _ in 0..5 {
            assert!(svc.report(post.id).await.unwrap());
        }
        assert_eq!(svc.get_post(post.id).await.unwrap().unwrap().report_count, 5);

        assert!(svc.clear_reports(post.id).await.unwrap());
        let cleared = svc.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(cleared.report_count, 0);
        // The post itself survives moderation clearing.
        assert_eq!(cleared.title, "t");
    }

    #[tokio::test]
    async fn comments_append_in_order_and_touch_nothing_else() {
        let (svc, _) = service();
        let user = author("Ada", "Lovelace");
        let post = publish_one(&svc, &user, "t", "body", &[]).await;

        for name in ["first", "second"] {
            let ok = svc
                .comment(
                    post.id,
                    Comment {
                        username: name.to_string(),
                        comment: format!("{name} comment"),
                        image_comment: None,
                    },
                )
                .await
                .unwrap();
            assert!(ok);
        }

        let found = svc.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(found.comments.0.len(), 2);
        assert_eq!(found.comments.0[0].username, "first");
        assert_eq!(found.title, post.title);
        assert_eq!(found.views_count, post.views_count);
    }

    #[tokio::test]
    async fn related_posts_share_a_tag_and_exclude_the_post() {
        let (svc, _) = service();
        let user = author("Ada", "Lovelace");
        let base = publish_one(&svc, &user, "base", "body", &["tech"]).await;
        publish_one(&svc, &user, "kin", "body", &["tech", "life"]).await;
        publish_one(&svc, &user, "stranger", "body", &["food"]).await;

        let related = svc.related(&base).await.unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].title, "kin");
    }

    #[tokio::test]
    async fn reported_feed_lists_most_reported_first() {
        let (svc, _) = service();
        let user = author("Ada", "Lovelace");
        let mild = publish_one(&svc, &user, "mild", "body", &[]).await;
        let severe = publish_one(&svc, &user, "severe", "body", &[]).await;
        publish_one(&svc, &user, "clean", "body", &[]).await;

        svc.report(mild.id).await.unwrap();
        for _ in 0..3 {
            svc.report(severe.id).await.unwrap();
        }

        let reported = svc.reported().await.unwrap();
        assert_eq!(
            reported.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            vec!["severe", "mild"]
        );
    }

    #[tokio::test]
    async fn publishing_records_the_chosen_template() {
        let (svc, store) = service();
        let template = Template {
            id: Uuid::now_v7(),
            name: "Classic".to_string(),
            image: "templates/classic.webp".to_string(),
        };
        store.seed_template(template.clone()).await;

        let listed = svc.templates().await.unwrap();
        assert_eq!(listed.len(), 1);

        let user = author("Ada", "Lovelace");
        let draft = PostsService::build_draft(
            &user,
            "t".into(),
            Some("body".into()),
            None,
            "img.webp".into(),
            vec![],
        );
        let post = svc.publish(draft, Some(template.id)).await.unwrap();
        assert_eq!(post.template_id, Some(template.id));
        assert_eq!(post.views_count, 0);
        assert_eq!(post.report_count, 0);
        assert!(post.comments.0.is_empty());
    }

    #[tokio::test]
    async fn edit_replaces_fields_and_keeps_image_without_upload() {
        let (svc, _) = service();
        let user = author("Ada", "Lovelace");
        let post = publish_one(&svc, &user, "before", "body", &["tech"]).await;

        let update = PostUpdate {
            title: "after".to_string(),
            content: "new body".to_string(),
            category: vec!["life".to_string()],
            template_id: Some(Uuid::now_v7()),
            image_post: None,
        };
        assert!(svc.update(post.id, &update).await.unwrap());

        let edited = svc.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(edited.title, "after");
        assert_eq!(edited.image_post, "img.webp");
        assert_eq!(edited.account_name, "Ada Lovelace");
    }
}
