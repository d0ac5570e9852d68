use time::OffsetDateTime;

use super::dto::Reactions;
use crate::error::AppError;
use crate::recipes::repo::Kitchen;
use crate::recipes::repo_types::Comment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

/// Bumps one counter by exactly one. No cap and no per-user tracking.
pub fn react(kitchen: &mut Kitchen, key: &str, reaction: Reaction) -> Result<Reactions, AppError> {
    let recipe = kitchen.resolve_mut(key)?;
    match reaction {
        Reaction::Like => recipe.likes = recipe.likes.saturating_add(1),
        Reaction::Dislike => recipe.dislikes = recipe.dislikes.saturating_add(1),
    }
    Ok(Reactions {
        likes: recipe.likes,
        dislikes: recipe.dislikes,
    })
}

/// Appends a comment to the recipe's thread. Blank author or text is accepted.
pub fn post_comment(
    kitchen: &mut Kitchen,
    key: &str,
    author: String,
    text: String,
) -> Result<Comment, AppError> {
    let id = kitchen.resolve(key)?.id;
    let comment = Comment {
        author,
        text,
        created_at: OffsetDateTime::now_utc(),
    };
    kitchen.push_comment(id, comment.clone());
    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::{repo::test_support::recipe, repo_types::Category};

    #[test]
    fn reactions_count_every_call() {
        let mut k = Kitchen::new();
        k.insert(recipe("X", Category::Snack, &[])).unwrap();
        for _ in 0..3 {
            react(&mut k, "X", Reaction::Like).unwrap();
        }
        let r = react(&mut k, "X", Reaction::Dislike).unwrap();
        assert_eq!(r, Reactions { likes: 3, dislikes: 1 });
        assert_eq!(k.find("X").unwrap().likes, 3);
    }

    #[test]
    fn reacting_to_unknown_recipe_fails() {
        let mut k = Kitchen::new();
        assert!(matches!(
            react(&mut k, "X", Reaction::Like),
            Err(AppError::RecipeNotFound(_))
        ));
    }

    #[test]
    fn comment_goes_to_one_recipe_only() {
        let mut k = Kitchen::new();
        let x = k.insert(recipe("X", Category::Lunch, &[])).unwrap().id;
        let y = k.insert(recipe("Y", Category::Lunch, &[])).unwrap().id;
        post_comment(&mut k, "Y", "Ana".into(), "Too salty".into()).unwrap();

        let before_y = k.comments(y).len();
        let c = post_comment(&mut k, "X", "Sam".into(), "Great!".into()).unwrap();

        assert_eq!(k.comments(x).len(), 1);
        assert_eq!(k.comments(x)[0], c);
        assert_eq!(k.comments(y).len(), before_y);
    }

    #[test]
    fn blank_comment_is_accepted() {
        let mut k = Kitchen::new();
        let x = k.insert(recipe("X", Category::Lunch, &[])).unwrap().id;
        post_comment(&mut k, "X", String::new(), String::new()).unwrap();
        assert_eq!(k.comments(x).len(), 1);
    }
}
