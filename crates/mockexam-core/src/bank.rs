//! Question sources other than test-definition files: the built-in Spring
//! certification bank, JSON course files, and order shuffling.

use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::codec::{parse_answer, AnswerSet};
use crate::error::InvalidAnswer;
use crate::model::Question;

type BuiltinEntry = (&'static str, &'static str, [&'static str; 4], &'static [usize]);

const BUILTIN: &[BuiltinEntry] = &[
    (
        "Q1",
        "In the lifecycle of a Spring bean, which statement is correct?",
        [
            "Every bean is always prototype-scoped.",
            "Methods annotated with @PostConstruct run after the bean has been initialized.",
            "Spring does not support custom destroy methods.",
            "@Autowired runs before the constructor.",
        ],
        &[1],
    ),
    (
        "Q2",
        "Moving from Spring Boot 2.7 to 3.x, which change is true?",
        [
            "Migrating to Jakarta EE (jakarta.* packages) is mandatory.",
            "Spring Boot 3 no longer supports embedded Tomcat.",
            "Spring profiles can no longer be used.",
            "@Configuration has been removed.",
        ],
        &[0],
    ),
    (
        "Q3",
        "When is @Configuration preferable to @Component?",
        [
            "When the class declares @Bean methods that must be managed through a CGLIB proxy.",
            "When you do not want to register any bean in the container.",
            "Only when using XML exclusively.",
            "When beans must always be prototype-scoped.",
        ],
        &[0],
    ),
    (
        "Q4",
        "A REST controller binds a DTO directly without validation. What is the main risk?",
        [
            "Automatic SQL injection.",
            "Mass assignment: a client can populate fields that should not be modifiable.",
            "Passwords get encrypted twice.",
            "No risk: Spring filters extra fields automatically.",
        ],
        &[1],
    ),
    (
        "Q5",
        "Which statements about @Configuration and @AutoConfiguration in Spring Boot 3 are correct?",
        [
            "@AutoConfiguration is processed by the auto-configuration mechanism and can be conditional on the presence or absence of other beans.",
            "@Configuration defines explicit configuration that is always registered when the class is component-scanned.",
            "@AutoConfiguration is deprecated and should no longer be used.",
            "@Configuration can only be used in tests.",
        ],
        &[0, 1],
    ),
    (
        "Q6",
        "In Spring Security 6 (Spring Boot 3.x), what is the recommended way to configure HTTP security?",
        [
            "Extend WebSecurityConfigurerAdapter.",
            "Define a SecurityFilterChain bean using the lambda DSL.",
            "Configure everything in XML.",
            "Security can no longer be customized.",
        ],
        &[1],
    ),
    (
        "Q7",
        "How do you specify a custom configuration for a Feign client with Spring Cloud OpenFeign?",
        [
            "With @FeignClient(configuration = MyFeignConfig.class).",
            "With @FeignClient(feignConfig = MyFeignConfig.class).",
            "With @FeignMapping on every method.",
            "With @FeignInterceptor at class level.",
        ],
        &[0],
    ),
    (
        "Q8",
        "In Spring Boot Actuator (2.7/3.x), which endpoints should NOT be exposed publicly in production for security reasons?",
        ["/info", "/health", "/env", "/beans"],
        &[2, 3],
    ),
    (
        "Q9",
        "In Spring AOP aspects, which type gives access to information about the target method call?",
        [
            "JoinPoint (or ProceedingJoinPoint).",
            "TargetMethod.",
            "SpringInvocation.",
            "ProxyPoint.",
        ],
        &[0],
    ),
    (
        "Q10",
        "What are the main reactive types used by Spring WebFlux?",
        [
            "CompletableFuture and Stream.",
            "Mono and Flux.",
            "Observable and Single.",
            "Task and IObservable.",
        ],
        &[1],
    ),
    (
        "Q11",
        "What does SpringApplication.run(...) do in a Spring Boot application?",
        [
            "Starts the Spring context, prepares the environment and, for web apps, the embedded server.",
            "Only registers beans without starting anything.",
            "Only starts the Spring Security layer.",
            "Only runs component scanning without creating beans.",
        ],
        &[0],
    ),
    (
        "Q12",
        "What is the main difference between @RestController and @Controller?",
        [
            "@RestController combines @Controller and @ResponseBody, returning the body as JSON/XML by default.",
            "@Controller cannot handle HTTP requests.",
            "They are completely equivalent.",
            "@RestController can only be used with WebFlux.",
        ],
        &[0],
    ),
    (
        "Q13",
        "Which of these is a potential security hole if left unprotected?",
        [
            "Exposing the Actuator /env endpoint to the internet without authentication.",
            "Using @Value to read a property.",
            "Using @Transactional on a service.",
            "Registering a bean with @Component.",
        ],
        &[0],
    ),
    (
        "Q14",
        "How do you correctly handle a transaction that spans several repositories?",
        [
            "Put @Transactional on the service method that coordinates the operations.",
            "Put @Transactional on every repository method.",
            "Put @Transactional on the controller methods.",
            "XML configuration is mandatory.",
        ],
        &[0],
    ),
    (
        "Q15",
        "Which class does Spring Boot use by default for JSON serialization and deserialization?",
        [
            "GsonParser",
            "Jackson ObjectMapper",
            "JsonReader",
            "JsonMarshaller",
        ],
        &[1],
    ),
];

/// The built-in question set used when no test file can be loaded.
pub fn builtin_questions() -> Vec<Question> {
    BUILTIN
        .iter()
        .map(|(id, text, options, correct)| {
            Question::new(
                *id,
                *text,
                options.iter().map(|o| o.to_string()).collect(),
                correct.iter().copied().collect(),
                None,
            )
            .expect("built-in question is well-formed")
        })
        .collect()
}

/// JSON course file layout.
#[derive(Debug, Deserialize)]
struct JsonCourse {
    #[serde(default)]
    questions: Vec<JsonQuestion>,
}

#[derive(Debug, Deserialize)]
struct JsonQuestion {
    #[serde(default)]
    id: Option<String>,
    text: String,
    options: Vec<String>,
    /// Correct option letters, e.g. `["A", "C"]`.
    #[serde(default)]
    correct: Vec<String>,
    #[serde(default)]
    answer: Option<String>,
}

/// Load a JSON course file.
pub fn load_json_course(path: &Path) -> Result<Vec<Question>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course file: {}", path.display()))?;

    parse_json_course(&content)
        .with_context(|| format!("failed to parse course file: {}", path.display()))
}

/// Parse JSON course content (useful for testing).
///
/// Questions without an `id` are numbered `J1`, `J2`, … by position.
pub fn parse_json_course(content: &str) -> Result<Vec<Question>> {
    let course: JsonCourse = serde_json::from_str(content).context("invalid course JSON")?;

    course
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let id = q.id.unwrap_or_else(|| format!("J{}", i + 1));
            let correct = correct_letters(&q.correct, q.options.len())
                .with_context(|| format!("invalid correct answers for question {id}"))?;
            Ok(Question::new(id, q.text, q.options, correct, q.answer)?)
        })
        .collect::<Result<Vec<_>>>()
}

/// Each array entry names exactly one option letter.
fn correct_letters(entries: &[String], option_count: usize) -> Result<AnswerSet> {
    let mut correct = AnswerSet::new();
    for entry in entries {
        let letter = entry.trim();
        if letter.chars().count() != 1 {
            anyhow::bail!("expected a single letter, got {letter:?}");
        }
        correct.extend(parse_answer(letter, option_count)?.iter());
    }
    if correct.is_empty() {
        return Err(InvalidAnswer::NoValidAnswer.into());
    }
    Ok(correct)
}

/// Shuffle question order in place.
pub fn shuffle_questions(questions: &mut [Question]) {
    shuffle_questions_with(questions, &mut rand::thread_rng());
}

/// Shuffle question order with a caller-supplied RNG.
pub fn shuffle_questions_with<R: Rng + ?Sized>(questions: &mut [Question], rng: &mut R) {
    questions.shuffle(rng);
}
