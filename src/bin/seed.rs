//! Seed script for development: populates a fresh database with a sample catalog.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use rust_decimal::Decimal;
use sqlx::PgPool;

const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Drama",
    "Fantasy",
    "Horror",
    "Romance",
    "Science Fiction",
    "Thriller",
    "War",
];

/// (full name, birth date)
const PEOPLE: &[(&str, Option<&str>)] = &[
    ("Christopher Nolan", Some("1970-07-30")),
    ("Leonardo DiCaprio", Some("1974-11-11")),
    ("Joseph Gordon-Levitt", Some("1981-02-17")),
    ("Hans Zimmer", Some("1957-09-12")),
    ("Keanu Reeves", Some("1964-09-02")),
    ("Carrie-Anne Moss", Some("1967-08-21")),
    ("Lana Wachowski", Some("1965-06-21")),
    ("Hayao Miyazaki", Some("1941-01-05")),
    ("Audrey Tautou", Some("1976-08-09")),
    ("Jean-Pierre Jeunet", Some("1953-09-03")),
    ("Al Pacino", Some("1940-04-25")),
    ("Robert De Niro", Some("1943-08-17")),
    ("Michael Mann", Some("1943-02-05")),
    ("Guillermo del Toro", Some("1964-10-09")),
    ("Ivana Baquero", Some("1994-06-11")),
    ("Sigourney Weaver", Some("1949-10-08")),
    ("Ridley Scott", Some("1937-11-30")),
    ("Penélope Cruz", Some("1974-04-28")),
    ("Pedro Almodóvar", Some("1949-09-25")),
    ("Anonymous Extra", None),
];

struct SeedMovie {
    title: &'static str,
    original_title: Option<&'static str>,
    synopsis: &'static str,
    year: i32,
    minutes: i32,
    language: &'static str,
    /// Price in cents.
    price: i64,
    genres: &'static [&'static str],
}

const MOVIES: &[SeedMovie] = &[
    SeedMovie { title: "Inception", original_title: None, synopsis: "A thief who steals corporate secrets through dream-sharing technology is given the task of planting an idea.", year: 2010, minutes: 148, language: "English", price: 399, genres: &["Action", "Science Fiction", "Thriller"] },
    SeedMovie { title: "The Matrix", original_title: None, synopsis: "A hacker learns the true nature of his reality and his role in the war against its controllers.", year: 1999, minutes: 136, language: "English", price: 299, genres: &["Action", "Science Fiction"] },
    SeedMovie { title: "Spirited Away", original_title: Some("Sen to Chihiro no Kamikakushi"), synopsis: "A girl wanders into a world ruled by gods, witches and spirits.", year: 2001, minutes: 125, language: "Japanese", price: 349, genres: &["Animation", "Fantasy", "Adventure"] },
    SeedMovie { title: "Amélie", original_title: Some("Le Fabuleux Destin d'Amélie Poulain"), synopsis: "A shy waitress decides to change the lives of those around her for the better.", year: 2001, minutes: 122, language: "French", price: 249, genres: &["Comedy", "Romance"] },
    SeedMovie { title: "Heat", original_title: None, synopsis: "A group of professional bank robbers start to feel the heat from police.", year: 1995, minutes: 170, language: "English", price: 299, genres: &["Crime", "Drama", "Thriller"] },
    SeedMovie { title: "Pan's Labyrinth", original_title: Some("El laberinto del fauno"), synopsis: "In post-war Spain a girl escapes into an eerie but captivating fantasy world.", year: 2006, minutes: 118, language: "Spanish", price: 349, genres: &["Drama", "Fantasy", "War"] },
    SeedMovie { title: "Alien", original_title: None, synopsis: "The crew of a commercial spacecraft encounter a deadly lifeform.", year: 1979, minutes: 117, language: "English", price: 199, genres: &["Horror", "Science Fiction"] },
    SeedMovie { title: "Interstellar", original_title: None, synopsis: "A team of explorers travel through a wormhole in space to ensure humanity's survival.", year: 2014, minutes: 169, language: "English", price: 449, genres: &["Adventure", "Drama", "Science Fiction"] },
    SeedMovie { title: "The Godfather", original_title: None, synopsis: "The aging patriarch of an organized crime dynasty transfers control to his reluctant son.", year: 1972, minutes: 175, language: "English", price: 299, genres: &["Crime", "Drama"] },
    SeedMovie { title: "Volver", original_title: None, synopsis: "After her death, a mother returns to her home town to fix the situations she left unresolved.", year: 2006, minutes: 121, language: "Spanish", price: 279, genres: &["Comedy", "Drama"] },
    SeedMovie { title: "My Neighbor Totoro", original_title: Some("Tonari no Totoro"), synopsis: "Two sisters move to the country and discover the forest spirits who live nearby.", year: 1988, minutes: 86, language: "Japanese", price: 249, genres: &["Animation", "Fantasy"] },
    SeedMovie { title: "Blade Runner", original_title: None, synopsis: "A blade runner must pursue and terminate four replicants who stole a ship in space.", year: 1982, minutes: 117, language: "English", price: 249, genres: &["Science Fiction", "Thriller"] },
    SeedMovie { title: "The Dark Knight", original_title: None, synopsis: "Batman faces the Joker, a criminal mastermind who wants to plunge Gotham into anarchy.", year: 2008, minutes: 152, language: "English", price: 399, genres: &["Action", "Crime", "Drama"] },
    SeedMovie { title: "Princess Mononoke", original_title: Some("Mononoke-hime"), synopsis: "A prince becomes involved in the struggle between forest gods and a mining colony.", year: 1997, minutes: 134, language: "Japanese", price: 299, genres: &["Animation", "Adventure", "Fantasy"] },
    SeedMovie { title: "Dunkirk", original_title: None, synopsis: "Allied soldiers are surrounded by the German army and evacuated during a fierce battle.", year: 2017, minutes: 106, language: "English", price: 399, genres: &["Action", "Drama", "War"] },
];

/// (movie title, person, character, billing order)
const CAST: &[(&str, &str, &str, i32)] = &[
    ("Inception", "Leonardo DiCaprio", "Dom Cobb", 1),
    ("Inception", "Joseph Gordon-Levitt", "Arthur", 2),
    ("The Matrix", "Keanu Reeves", "Neo", 1),
    ("The Matrix", "Carrie-Anne Moss", "Trinity", 2),
    ("Amélie", "Audrey Tautou", "Amélie Poulain", 1),
    ("Heat", "Al Pacino", "Vincent Hanna", 1),
    ("Heat", "Robert De Niro", "Neil McCauley", 2),
    ("Pan's Labyrinth", "Ivana Baquero", "Ofelia", 1),
    ("Alien", "Sigourney Weaver", "Ripley", 1),
    ("The Godfather", "Al Pacino", "Michael Corleone", 2),
    ("Volver", "Penélope Cruz", "Raimunda", 1),
];

/// (movie title, person, role)
const CREW: &[(&str, &str, &str)] = &[
    ("Inception", "Christopher Nolan", "Director"),
    ("Inception", "Christopher Nolan", "Writer"),
    ("Inception", "Hans Zimmer", "Composer"),
    ("The Matrix", "Lana Wachowski", "Director"),
    ("Spirited Away", "Hayao Miyazaki", "Director"),
    ("Amélie", "Jean-Pierre Jeunet", "Director"),
    ("Heat", "Michael Mann", "Director"),
    ("Pan's Labyrinth", "Guillermo del Toro", "Director"),
    ("Alien", "Ridley Scott", "Director"),
    ("Interstellar", "Christopher Nolan", "Director"),
    ("Interstellar", "Hans Zimmer", "Composer"),
    ("Volver", "Pedro Almodóvar", "Director"),
    ("My Neighbor Totoro", "Hayao Miyazaki", "Director"),
    ("Blade Runner", "Ridley Scott", "Director"),
    ("The Dark Knight", "Christopher Nolan", "Director"),
    ("The Dark Knight", "Hans Zimmer", "Composer"),
    ("Princess Mononoke", "Hayao Miyazaki", "Director"),
    ("Dunkirk", "Christopher Nolan", "Director"),
    ("Dunkirk", "Hans Zimmer", "Composer"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = movierental::db::create_pool(&db_url, 5).await?;

    movierental::db::run_migrations(&pool).await?;

    println!("=== Movie Rental Seed Script ===");

    seed_genres(&pool).await?;
    seed_people(&pool).await?;
    seed_movies(&pool).await?;
    seed_credits(&pool).await?;

    println!("\n=== Seed complete! ===");

    Ok(())
}

async fn table_is_empty(pool: &PgPool, table: &str) -> anyhow::Result<bool> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count == 0)
}

async fn seed_genres(pool: &PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "genres").await? {
        println!("[skip] Genres already present");
        return Ok(());
    }

    for name in GENRES {
        sqlx::query("INSERT INTO genres (name) VALUES ($1)")
            .bind(name)
            .execute(pool)
            .await?;
    }
    println!("[done] Created {} genres", GENRES.len());
    Ok(())
}

async fn seed_people(pool: &PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "people").await? {
        println!("[skip] People already present");
        return Ok(());
    }

    for (name, birth_date) in PEOPLE {
        let birth_date = birth_date
            .map(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d"))
            .transpose()?;
        sqlx::query("INSERT INTO people (full_name, birth_date) VALUES ($1, $2)")
            .bind(name)
            .bind(birth_date)
            .execute(pool)
            .await?;
    }
    println!("[done] Created {} people", PEOPLE.len());
    Ok(())
}

async fn seed_movies(pool: &PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "movies").await? {
        println!("[skip] Movies already present");
        return Ok(());
    }

    for movie in MOVIES {
        let mut tx = pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO movies (title, original_title, synopsis, release_year,
                duration_minutes, language, rental_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(movie.title)
        .bind(movie.original_title)
        .bind(movie.synopsis)
        .bind(movie.year)
        .bind(movie.minutes)
        .bind(movie.language)
        .bind(Decimal::new(movie.price, 2))
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO movie_genres (movie_id, genre_id)
            SELECT $1, id FROM genres WHERE name = ANY($2)
            "#,
        )
        .bind(id)
        .bind(movie.genres)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }
    println!("[done] Created {} movies", MOVIES.len());
    Ok(())
}

async fn seed_credits(pool: &PgPool) -> anyhow::Result<()> {
    if !table_is_empty(pool, "movie_cast").await? || !table_is_empty(pool, "movie_crew").await? {
        println!("[skip] Credits already present");
        return Ok(());
    }

    for (title, person, character, order) in CAST {
        sqlx::query(
            r#"
            INSERT INTO movie_cast (movie_id, person_id, character_name, cast_order)
            SELECT m.id, p.id, $3, $4
            FROM movies m, people p
            WHERE m.title = $1 AND p.full_name = $2
            "#,
        )
        .bind(title)
        .bind(person)
        .bind(character)
        .bind(order)
        .execute(pool)
        .await?;
    }

    for (title, person, role) in CREW {
        sqlx::query(
            r#"
            INSERT INTO movie_crew (movie_id, person_id, role)
            SELECT m.id, p.id, $3
            FROM movies m, people p
            WHERE m.title = $1 AND p.full_name = $2
            "#,
        )
        .bind(title)
        .bind(person)
        .bind(role)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} cast and {} crew credits", CAST.len(), CREW.len());
    Ok(())
}
