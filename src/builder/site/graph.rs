use crate::builder::post::Post;

/// The ordered posts of one generation cycle.
///
/// Posts live in a single vector, newest first; neighbour links are
/// indices into it.
#[derive(Debug, Default)]
pub struct PostGraph {
    posts: Vec<Post>,
    index: Option<usize>,
    recent_len: usize,
}

impl PostGraph {
    /// Order the posts by descending publish time, link each one to its
    /// neighbours, select the index post and size the recent window.
    ///
    /// Sorting is stable: posts with the same publish time keep their
    /// input order. The index post is the newest one, unless posts carry
    /// the `IndexPage` key; then the sequence is scanned from the oldest
    /// post to the newest and the last flagged post seen wins.
    pub fn assemble(mut posts: Vec<Post>, recent_posts: usize) -> Self {
        posts.sort_by(|a, b| b.pub_time().cmp(&a.pub_time()));

        let len = posts.len();
        let mut index = if len > 0 { Some(0) } else { None };

        for i in (0..len).rev() {
            let post = &mut posts[i];
            post.prev = i.checked_sub(1);
            post.next = if i + 1 < len { Some(i + 1) } else { None };
            if post.is_index_page() {
                index = Some(i);
            }
        }

        PostGraph {
            posts,
            index,
            recent_len: recent_posts.min(len),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, position: usize) -> Option<&Post> {
        self.posts.get(position)
    }

    /// Position of the homepage post; `None` only when there are no posts
    pub fn index_position(&self) -> Option<usize> {
        self.index
    }

    pub fn index_post(&self) -> Option<&Post> {
        self.index.and_then(|i| self.posts.get(i))
    }

    /// The newest posts, at most the configured recent count
    pub fn recent(&self) -> &[Post] {
        &self.posts[..self.recent_len]
    }

    /// Newer neighbour of the post at `position`
    pub fn prev_of(&self, position: usize) -> Option<&Post> {
        self.posts.get(position)?.prev().and_then(|i| self.posts.get(i))
    }

    /// Older neighbour of the post at `position`
    pub fn next_of(&self, position: usize) -> Option<&Post> {
        self.posts.get(position)?.next().and_then(|i| self.posts.get(i))
    }
}
