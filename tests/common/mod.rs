#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizdesk_server::{
    app_state::AppState,
    auth::JwtService,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Contact, Quiz, QuizAttempt, QuizQuestion, Role, Student, StudentKey},
    repositories::{QuizAttemptRepository, QuizRepository, StudentRepository},
};

pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.quizzes.read().await.len()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_name(&self, quiz_name: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(quiz_name).cloned())
    }

    async fn upsert(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.quizzes
            .write()
            .await
            .insert(quiz.quiz_name.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn delete(&self, quiz_name: &str) -> AppResult<bool> {
        Ok(self.quizzes.write().await.remove(quiz_name).is_some())
    }

    async fn find_by_category(&self, category: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<Quiz> = quizzes
            .values()
            .filter(|q| q.category == category)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.quiz_name.cmp(&b.quiz_name));
        Ok(items)
    }

    async fn count_by_category(&self, category: &str) -> AppResult<u64> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.values().filter(|q| q.category == category).count() as u64)
    }
}

pub struct InMemoryStudentRepository<K: StudentKey> {
    students: RwLock<HashMap<K, Student<K>>>,
}

impl<K: StudentKey> InMemoryStudentRepository<K> {
    pub fn new() -> Self {
        Self {
            students: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, id: &K) -> Option<Student<K>> {
        self.students.read().await.get(id).cloned()
    }
}

#[async_trait]
impl<K: StudentKey> StudentRepository<K> for InMemoryStudentRepository<K> {
    async fn find(&self, id: &K) -> AppResult<Option<Student<K>>> {
        Ok(self.students.read().await.get(id).cloned())
    }

    async fn find_by_contact(&self, contact: &Contact) -> AppResult<Option<Student<K>>> {
        let students = self.students.read().await;
        let found = students.values().find(|s| match contact {
            Contact::Email(email) => s.email.as_deref() == Some(email.as_str()),
            Contact::Phone(phone) => &s.phone_number == phone,
        });
        Ok(found.cloned())
    }

    async fn insert(&self, student: Student<K>) -> AppResult<Student<K>> {
        let mut students = self.students.write().await;
        if students.contains_key(&student.id) {
            return Err(AppError::AlreadyExists("Student already registered".to_string()));
        }
        students.insert(student.id.clone(), student.clone());
        Ok(student)
    }

    async fn save(&self, student: Student<K>) -> AppResult<Student<K>> {
        self.students
            .write()
            .await
            .insert(student.id.clone(), student.clone());
        Ok(student)
    }
}

pub struct InMemoryQuizAttemptRepository<K: StudentKey> {
    attempts: RwLock<HashMap<(K, String), QuizAttempt<K>>>,
}

impl<K: StudentKey> InMemoryQuizAttemptRepository<K> {
    pub fn new() -> Self {
        Self {
            attempts: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.attempts.read().await.len()
    }
}

#[async_trait]
impl<K: StudentKey> QuizAttemptRepository<K> for InMemoryQuizAttemptRepository<K> {
    async fn find(&self, student_id: &K, quiz_name: &str) -> AppResult<Option<QuizAttempt<K>>> {
        let key = (student_id.clone(), quiz_name.to_string());
        Ok(self.attempts.read().await.get(&key).cloned())
    }

    async fn save(&self, attempt: QuizAttempt<K>) -> AppResult<QuizAttempt<K>> {
        let key = (attempt.student_id.clone(), attempt.quiz_name.clone());
        self.attempts.write().await.insert(key, attempt.clone());
        Ok(attempt)
    }

    async fn find_by_student(&self, student_id: &K) -> AppResult<Vec<QuizAttempt<K>>> {
        let attempts = self.attempts.read().await;
        let mut items: Vec<QuizAttempt<K>> = attempts
            .values()
            .filter(|a| &a.student_id == student_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.quiz_name.cmp(&b.quiz_name));
        Ok(items)
    }

    async fn delete_by_student(&self, student_id: &K) -> AppResult<u64> {
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|(student, _), _| student != student_id);
        Ok((before - attempts.len()) as u64)
    }

    async fn delete_by_quiz(&self, quiz_name: &str) -> AppResult<u64> {
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|(_, quiz), _| quiz != quiz_name);
        Ok((before - attempts.len()) as u64)
    }
}

/// Application state over in-memory stores, with handles kept for assertions.
pub struct TestContext<K: StudentKey> {
    pub state: AppState<K>,
    pub jwt: JwtService,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub students: Arc<InMemoryStudentRepository<K>>,
    pub attempts: Arc<InMemoryQuizAttemptRepository<K>>,
}

impl<K: StudentKey> TestContext<K> {
    pub fn new() -> Self {
        let config = Config::test_config();
        let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        let quizzes = Arc::new(InMemoryQuizRepository::new());
        let students = Arc::new(InMemoryStudentRepository::new());
        let attempts = Arc::new(InMemoryQuizAttemptRepository::new());

        let state = AppState::with_repositories(
            config,
            students.clone(),
            attempts.clone(),
            quizzes.clone(),
        );

        Self {
            state,
            jwt,
            quizzes,
            students,
            attempts,
        }
    }

    pub fn token(&self, sub: &str, email: &str) -> String {
        self.jwt
            .create_token(sub, Some(email), None)
            .expect("token should be issued")
    }

    pub async fn seed_student(&self, student: Student<K>) {
        self.students.save(student).await.expect("seed student");
    }

    pub async fn seed_quiz(&self, quiz: Quiz) {
        self.quizzes.upsert(quiz).await.expect("seed quiz");
    }
}

pub fn question(text: &str, correct: &str, options: &[&str]) -> QuizQuestion {
    QuizQuestion {
        question: text.to_string(),
        correct_answer: correct.to_string(),
        all_answers: options.iter().map(|o| o.to_string()).collect(),
        explanation: format!("answer is {}", correct),
    }
}

/// "A" for the first question, "B,C" for the second.
pub fn alg101() -> Quiz {
    Quiz::new(
        "ALG101",
        "CLS7-MATHS",
        30,
        vec![
            question("x + 1 = 2, x = ?", "A", &["1", "2", "3", "4"]),
            question("Which are even?", "B,C", &["1", "2", "4", "5"]),
        ],
    )
}

/// Students share one phone number; staff get one of their own so phone
/// lookups stay unambiguous.
pub fn make_student<K: StudentKey>(id: K, email: &str, class: &str, role: Option<Role>) -> Student<K> {
    let phone_number = match role {
        Some(Role::Admin) => "+910000000001",
        Some(Role::Super) => "+910000000002",
        _ => "+919876543210",
    };

    let mut student = Student::new(id, "Asha", phone_number, class);
    student.email = Some(email.to_string());
    student.role = role;
    student
}

/// An xlsx workbook with one sheet; numeric cells are stored as numbers.
pub fn question_sheet(rows: &[[&str; 4]]) -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            match value.parse::<f64>() {
                Ok(number) => worksheet.write_number(r as u32, c as u16, number),
                Err(_) => worksheet.write_string(r as u32, c as u16, *value),
            }
            .expect("cell should be written");
        }
    }

    workbook.save_to_buffer().expect("workbook should serialize")
}
