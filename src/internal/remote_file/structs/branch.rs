/// 顶层分支（一门课程）：短代码 + 文件区入口地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub id: String,
    pub url: String,
}

/// 分支表：分支代码唯一，保持门户列表中的顺序
///
/// 枚举完成后不再修改，整个同步过程都使用同一份。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchMap {
    branches: Vec<Branch>,
}

impl BranchMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入分支；代码已存在时保留原位置，只更新地址
    pub fn insert(&mut self, id: String, url: String) {
        match self.branches.iter_mut().find(|b| b.id == id) {
            Some(existing) => existing.url = url,
            None => self.branches.push(Branch { id, url }),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    /// 按分支表顺序筛选要同步的分支
    ///
    /// `selection` 为 `None` 时返回全部；选择中不存在的代码直接忽略。
    pub fn select(&self, selection: Option<&[String]>) -> Vec<Branch> {
        match selection {
            None => self.branches.clone(),
            Some(ids) => self
                .branches
                .iter()
                .filter(|b| ids.iter().any(|id| id == &b.id))
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<(String, String)> for BranchMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut map = BranchMap::new();
        for (id, url) in iter {
            map.insert(id, url);
        }
        map
    }
}
