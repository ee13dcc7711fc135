use std::time::Instant;

use tracing::warn;

use super::{
  form::CreateUserForm,
  notice::Notice,
  profile::render_profile,
  table::render_user_table,
};
use crate::{
  client::{ClientError, UserApi},
  domains::user::{
    model::{FieldError, User, UsersPage},
    pagination::total_pages,
  },
};

/// Rows per page requested by the table view.
pub const PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
  Table,
  Profile(User),
  CreateForm,
}

/// Navigation state of the client. Every mutation is followed by a re-fetch
/// of the current page so the table never shows rows the store no longer has.
pub struct Session<A> {
  api: A,
  current_page: i64,
  listing: Option<UsersPage>,
  view: View,
  form: CreateUserForm,
  field_errors: Vec<FieldError>,
  notice: Option<Notice>,
}

impl<A: UserApi> Session<A> {
  pub fn new(api: A) -> Self {
    Self {
      api,
      current_page: 1,
      listing: None,
      view: View::Table,
      form: CreateUserForm::default(),
      field_errors: Vec::new(),
      notice: None,
    }
  }

  pub fn current_page(&self) -> i64 {
    self.current_page
  }

  pub fn total_pages(&self) -> i64 {
    self
      .listing
      .as_ref()
      .map(|l| total_pages(l.total, l.limit))
      .unwrap_or(0)
  }

  pub fn users(&self) -> &[User] {
    self.listing.as_ref().map(|l| l.users.as_slice()).unwrap_or(&[])
  }

  pub fn view(&self) -> &View {
    &self.view
  }

  pub fn form(&self) -> &CreateUserForm {
    &self.form
  }

  pub fn field_errors(&self) -> &[FieldError] {
    &self.field_errors
  }

  /// The active notice, dropping it first if it has been shown long enough.
  pub fn notice_at(&mut self, now: Instant) -> Option<&Notice> {
    if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
      self.notice = None;
    }
    self.notice.as_ref()
  }

  fn fail(&mut self, context: &str, err: ClientError) {
    warn!(error = %err, "{}", context);
    self.notice = Some(Notice::error(format!("{}: {}", context, err), Instant::now()));
  }

  /// Loads `page` into the table view. Returns `false` and sets an error
  /// notice when the fetch fails; the previous listing is kept.
  pub async fn load_page(&mut self, page: i64) -> bool {
    let page = page.max(1);
    let result = self.api.fetch_users(page, PAGE_SIZE).await;
    match result {
      Ok(listing) => {
        self.current_page = listing.page;
        self.listing = Some(listing);
        self.view = View::Table;
        true
      }
      Err(err) => {
        self.fail("Failed to fetch users", err);
        false
      }
    }
  }

  pub async fn refresh(&mut self) -> bool {
    self.load_page(self.current_page).await
  }

  pub async fn next_page(&mut self) -> bool {
    if self.current_page >= self.total_pages() {
      return false;
    }
    self.load_page(self.current_page + 1).await
  }

  pub async fn previous_page(&mut self) -> bool {
    if self.current_page <= 1 {
      return false;
    }
    self.load_page(self.current_page - 1).await
  }

  pub async fn show_user(&mut self, user_id: i32) -> bool {
    let result = self.api.fetch_user(user_id).await;
    match result {
      Ok(user) => {
        self.view = View::Profile(user);
        true
      }
      Err(err) => {
        self.fail("Failed to fetch user", err);
        false
      }
    }
  }

  pub fn open_create_form(&mut self) {
    self.view = View::CreateForm;
  }

  pub fn back_to_list(&mut self) {
    self.view = View::Table;
  }

  pub async fn submit_create(&mut self, form: CreateUserForm) -> Option<User> {
    self.form = form;
    self.field_errors.clear();

    let request = self.form.to_request();
    let result = self.api.create_user(&request).await;
    match result {
      Ok(user) => {
        self.form.clear();
        self.notice = Some(Notice::success("User created successfully!", Instant::now()));
        let view = self.view.clone();
        self.refresh().await;
        self.view = view;
        Some(user)
      }
      Err(ClientError::Validation(errors)) => {
        self.field_errors = errors.clone();
        self.fail("Failed to create user", ClientError::Validation(errors));
        None
      }
      Err(err) => {
        self.fail("Failed to create user", err);
        None
      }
    }
  }

  /// Deletes a user and re-fetches. If that empties a page past the first,
  /// steps back to the new last page.
  pub async fn delete_user(&mut self, user_id: i32) -> bool {
    let result = self.api.delete_user(user_id).await;
    if let Err(err) = result {
      self.fail("Failed to delete user", err);
      return false;
    }

    self.notice = Some(Notice::success("User deleted successfully!", Instant::now()));
    if self.refresh().await && self.users().is_empty() && self.current_page > 1 {
      let last = self.total_pages().max(1);
      self.load_page(last).await;
    }
    true
  }

  pub fn render(&mut self) -> String {
    self.render_at(Instant::now())
  }

  pub fn render_at(&mut self, now: Instant) -> String {
    let mut out = String::from("User Management\n\n");
    if let Some(notice) = self.notice_at(now) {
      out.push_str(&notice.render());
      out.push_str("\n\n");
    }

    match &self.view {
      View::Table => out.push_str(&render_user_table(self.users(), self.current_page, self.total_pages())),
      View::Profile(user) => out.push_str(&render_profile(user)),
      View::CreateForm => out.push_str(&self.form.render(&self.field_errors)),
    }
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domains::user::model::CreateUserRequest;
  use async_trait::async_trait;
  use chrono::Utc;
  use mockall::{predicate::*, *};
  use std::time::Duration;

  mockall::mock! {
      Api {}

      #[async_trait]
      impl UserApi for Api {
          async fn fetch_users(&self, page: i64, limit: i64) -> crate::client::Result<UsersPage>;
          async fn fetch_user(&self, user_id: i32) -> crate::client::Result<User>;
          async fn create_user(&self, new_user: &CreateUserRequest) -> crate::client::Result<User>;
          async fn delete_user(&self, user_id: i32) -> crate::client::Result<()>;
      }
  }

  fn user(id: i32) -> User {
    User {
      id,
      name: format!("User {id}"),
      email: format!("user{id}@example.com"),
      created_at: Utc::now(),
    }
  }

  fn page_of(page: i64, total: i64) -> UsersPage {
    let first = (page - 1) * PAGE_SIZE + 1;
    let last = (page * PAGE_SIZE).min(total);
    UsersPage {
      users: (first..=last).map(|id| user(id as i32)).collect(),
      total,
      page,
      limit: PAGE_SIZE,
    }
  }

  #[tokio::test]
  async fn load_page_computes_total_pages() {
    let mut api = MockApi::new();
    api
      .expect_fetch_users()
      .with(eq(2), eq(PAGE_SIZE))
      .times(1)
      .returning(|page, _| Ok(page_of(page, 15)));

    let mut session = Session::new(api);
    assert!(session.load_page(2).await);
    assert_eq!(session.current_page(), 2);
    assert_eq!(session.total_pages(), 2);
    assert_eq!(session.users().len(), 5);
  }

  #[tokio::test]
  async fn next_page_stops_at_last_page() {
    let mut api = MockApi::new();
    api.expect_fetch_users().times(2).returning(|page, _| Ok(page_of(page, 15)));

    let mut session = Session::new(api);
    assert!(session.load_page(1).await);
    assert!(session.next_page().await);
    assert!(!session.next_page().await);
    assert_eq!(session.current_page(), 2);
  }

  #[tokio::test]
  async fn previous_page_is_noop_on_first_page() {
    let mut api = MockApi::new();
    api.expect_fetch_users().times(0);

    let mut session = Session::new(api);
    assert!(!session.previous_page().await);
    assert_eq!(session.current_page(), 1);
  }

  #[tokio::test]
  async fn fetch_failure_sets_error_notice_that_expires() {
    let mut api = MockApi::new();
    api.expect_fetch_users().times(1).returning(|_, _| {
      Err(ClientError::ServerError {
        status: 500,
        message: "boom".to_string(),
      })
    });

    let mut session = Session::new(api);
    assert!(!session.load_page(1).await);

    let now = Instant::now();
    let text = session.notice_at(now).map(|n| n.render()).unwrap_or_default();
    assert!(text.starts_with("Error! Failed to fetch users"));
    assert!(session.notice_at(now + Duration::from_secs(6)).is_none());
  }

  #[tokio::test]
  async fn create_refetches_current_page() {
    let mut api = MockApi::new();
    let mut seq = Sequence::new();
    api
      .expect_fetch_users()
      .times(1)
      .in_sequence(&mut seq)
      .returning(|page, _| Ok(page_of(page, 0)));
    api
      .expect_create_user()
      .withf(|req| req.name == "Ada" && req.email == "ada@example.com")
      .times(1)
      .in_sequence(&mut seq)
      .returning(|req| {
        Ok(User {
          id: 1,
          name: req.name.clone(),
          email: req.email.clone(),
          created_at: Utc::now(),
        })
      });
    api
      .expect_fetch_users()
      .times(1)
      .in_sequence(&mut seq)
      .returning(|page, _| Ok(page_of(page, 1)));

    let mut session = Session::new(api);
    session.load_page(1).await;
    session.open_create_form();

    let created = session.submit_create(CreateUserForm::new("Ada", "ada@example.com")).await;
    assert_eq!(created.map(|u| u.id), Some(1));
    assert_eq!(session.users().len(), 1);
    assert_eq!(session.view(), &View::CreateForm);
    assert_eq!(session.form(), &CreateUserForm::default());
    assert!(session.render().contains("Success! User created successfully!"));
  }

  #[tokio::test]
  async fn create_validation_failure_keeps_input_and_field_errors() {
    let mut api = MockApi::new();
    api.expect_create_user().times(1).returning(|_| {
      Err(ClientError::Validation(vec![FieldError {
        field: "email".to_string(),
        code: "email".to_string(),
        message: "Invalid email address".to_string(),
      }]))
    });
    api.expect_fetch_users().times(0);

    let mut session = Session::new(api);
    session.open_create_form();
    assert!(session.submit_create(CreateUserForm::new("Ada", "bad")).await.is_none());
    assert_eq!(session.form().email, "bad");
    assert_eq!(session.field_errors().len(), 1);
    assert!(session.render().contains("! Invalid email address"));
  }

  #[tokio::test]
  async fn delete_that_empties_page_steps_back() {
    let mut api = MockApi::new();
    let mut seq = Sequence::new();
    api
      .expect_fetch_users()
      .with(eq(2), eq(PAGE_SIZE))
      .times(1)
      .in_sequence(&mut seq)
      .returning(|page, _| Ok(page_of(page, 11)));
    api
      .expect_delete_user()
      .with(eq(11))
      .times(1)
      .in_sequence(&mut seq)
      .returning(|_| Ok(()));
    api
      .expect_fetch_users()
      .with(eq(2), eq(PAGE_SIZE))
      .times(1)
      .in_sequence(&mut seq)
      .returning(|_, _| {
        Ok(UsersPage {
          users: Vec::new(),
          total: 10,
          page: 2,
          limit: PAGE_SIZE,
        })
      });
    api
      .expect_fetch_users()
      .with(eq(1), eq(PAGE_SIZE))
      .times(1)
      .in_sequence(&mut seq)
      .returning(|page, _| Ok(page_of(page, 10)));

    let mut session = Session::new(api);
    session.load_page(2).await;
    assert!(session.delete_user(11).await);
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.users().len(), 10);
  }

  #[tokio::test]
  async fn delete_not_found_reports_error_without_refetch() {
    let mut api = MockApi::new();
    api.expect_delete_user().times(1).returning(|_| Err(ClientError::NotFound));
    api.expect_fetch_users().times(0);

    let mut session = Session::new(api);
    assert!(!session.delete_user(5).await);
    assert!(session.render().contains("Error! Failed to delete user: User not found"));
  }

  #[tokio::test]
  async fn show_user_switches_to_profile() {
    let mut api = MockApi::new();
    api.expect_fetch_user().with(eq(3)).times(1).returning(|id| Ok(user(id)));

    let mut session = Session::new(api);
    assert!(session.show_user(3).await);
    assert!(matches!(session.view(), View::Profile(u) if u.id == 3));
    assert!(session.render().contains("User Profile"));

    session.back_to_list();
    assert_eq!(session.view(), &View::Table);
  }
}
