use crate::models::{ItemRecommendResponse, UserRecommendResponse};

/// Neighbor user annotated with its similarity
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarUserEntry {
    pub user_id: String,
    pub similarity: f64,
}

/// Row of the user-based recommendations table
#[derive(Debug, Clone, PartialEq)]
pub struct UserBookRow {
    pub cover_url: String,
    pub title: String,
    pub isbn: String,
    pub author: String,
    pub predicted_score: f64,
    pub similarity: f64,
}

/// Row of the similar-books table
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarBookRow {
    pub cover_url: String,
    pub title: String,
    pub isbn: String,
    pub author: String,
    pub similarity: f64,
    pub avg_rating: f64,
}

/// Descriptor of the book an item-based query started from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceBookCard {
    pub cover_url: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserPanel {
    pub similar_users: Vec<SimilarUserEntry>,
    pub recommendations: Vec<UserBookRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemPanel {
    pub source_book: SourceBookCard,
    pub similar_books: Vec<SimilarBookRow>,
}

fn cover(image_url: Option<&str>, placeholder: &str) -> String {
    match image_url {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => placeholder.to_string(),
    }
}

impl UserPanel {
    pub fn from_response(response: &UserRecommendResponse, placeholder: &str) -> Self {
        let similar_users = response
            .similar_users
            .iter()
            .map(|user| SimilarUserEntry {
                user_id: user.user_id.to_string(),
                similarity: user.similarity,
            })
            .collect();

        let recommendations = response
            .recommendations
            .iter()
            .map(|book| UserBookRow {
                cover_url: cover(book.image_url.as_deref(), placeholder),
                title: book.title.clone(),
                isbn: book.isbn.clone(),
                author: book.author.clone(),
                predicted_score: book.predicted_score,
                similarity: book.similarity,
            })
            .collect();

        Self {
            similar_users,
            recommendations,
        }
    }
}

impl ItemPanel {
    pub fn from_response(response: &ItemRecommendResponse, placeholder: &str) -> Self {
        let source = &response.source_book;
        let source_book = SourceBookCard {
            cover_url: cover(source.image_url.as_deref(), placeholder),
            title: source.title.clone(),
            author: source.author.clone(),
            isbn: source.isbn.clone(),
        };

        let similar_books = response
            .recommendations
            .iter()
            .map(|book| SimilarBookRow {
                cover_url: cover(book.image_url.as_deref(), placeholder),
                title: book.title.clone(),
                isbn: book.isbn.clone(),
                author: book.author.clone(),
                similarity: book.similarity,
                avg_rating: book.avg_rating,
            })
            .collect();

        Self {
            source_book,
            similar_books,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PLACEHOLDER: &str = "https://via.placeholder.com/60x90?text=No+Cover";

    #[test]
    fn test_user_panel_substitutes_placeholder_cover() {
        let response: UserRecommendResponse = serde_json::from_value(json!({
            "success": true,
            "similar_users": [{ "user_id": 11676, "similarity": 0.912 }],
            "recommendations": [
                {
                    "isbn": "0316666343",
                    "title": "The Lovely Bones",
                    "author": "Alice Sebold",
                    "predicted_score": 8.21,
                    "similarity": 0.912
                },
                {
                    "isbn": "0385504209",
                    "title": "The Da Vinci Code",
                    "author": "Dan Brown",
                    "image_url": "http://images.amazon.com/0385504209.jpg",
                    "predicted_score": 7.3,
                    "similarity": 0.5
                }
            ]
        }))
        .unwrap();

        let panel = UserPanel::from_response(&response, PLACEHOLDER);

        assert_eq!(panel.similar_users[0].user_id, "11676");
        assert_eq!(panel.recommendations[0].cover_url, PLACEHOLDER);
        assert_eq!(
            panel.recommendations[1].cover_url,
            "http://images.amazon.com/0385504209.jpg"
        );
        assert_eq!(panel.recommendations[0].predicted_score, 8.21);
    }

    #[test]
    fn test_item_panel_source_book_without_cover() {
        let response: ItemRecommendResponse = serde_json::from_value(json!({
            "success": true,
            "source_book": {
                "isbn": "0195153448",
                "title": "Classical Mythology",
                "author": "Mark P. O. Morford"
            },
            "recommendations": [{
                "isbn": "0002005018",
                "title": "Clara Callan",
                "author": "Richard Bruce Wright",
                "image_url": "",
                "similarity": 0.41,
                "avg_rating": 4.93
            }]
        }))
        .unwrap();

        let panel = ItemPanel::from_response(&response, PLACEHOLDER);

        assert_eq!(panel.source_book.cover_url, PLACEHOLDER);
        assert_eq!(panel.source_book.title, "Classical Mythology");
        assert_eq!(panel.similar_books[0].cover_url, PLACEHOLDER);
        assert_eq!(panel.similar_books[0].avg_rating, 4.93);
    }
}
